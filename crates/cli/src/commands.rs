use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bms", version, about = "Book management CLI")]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Server base URL, overriding client.server_url from the configuration"
    )]
    pub server: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Commands involving books
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },
    /// Commands involving collections
    Collection {
        #[command(subcommand)]
        command: CollectionCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum BookCommands {
    /// Create a book
    Create {
        title: String,
        #[command(flatten)]
        fields: BookFields,
    },
    /// List books, optionally filtered
    List {
        #[arg(long, help = "Get book with title")]
        title: Option<String>,
        #[arg(long, help = "Filter books by author")]
        author: Option<String>,
        #[arg(long, help = "Filter books by genre")]
        genre: Option<String>,
        #[arg(long, alias = "publish_start", help = "Earliest publish date, YYYY-MM-DD")]
        publish_start: Option<String>,
        #[arg(long, alias = "publish_end", help = "Latest publish date, YYYY-MM-DD")]
        publish_end: Option<String>,
    },
    /// Set attributes of an existing book
    Set {
        title: String,
        #[command(flatten)]
        fields: BookFields,
    },
    /// Remove a book
    Remove { title: String },
}

/// Optional book attributes shared by `create` and `set`.
#[derive(Args, Debug, Default)]
pub struct BookFields {
    #[arg(short = 'a', long, help = "Author of the book")]
    pub author: Option<String>,
    #[arg(short = 'g', long, help = "Genre of the book")]
    pub genre: Option<String>,
    #[arg(
        short = 'p',
        long,
        alias = "published_at",
        help = "Publish date of the book, YYYY-MM-DD"
    )]
    pub published_at: Option<String>,
    #[arg(short = 'd', long, help = "Description of the book")]
    pub description: Option<String>,
    #[arg(short = 'e', long, help = "Edition of the book")]
    pub edition: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CollectionCommands {
    /// Create a collection
    Create {
        name: String,
        #[arg(long, help = "Description of the collection")]
        description: Option<String>,
    },
    /// Remove a collection
    Remove { name: String },
    /// Add a book to a collection
    AddBook { collection: String, title: String },
    /// Remove a book from a collection
    RemoveBook { collection: String, title: String },
    /// List collections, or the books in one collection
    List { name: Option<String> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_book_create_flags() {
        let cli = Cli::parse_from([
            "bms",
            "--server",
            "http://books.local",
            "book",
            "create",
            "Dune",
            "--author",
            "Frank Herbert",
            "--published-at",
            "1965-08-01",
        ]);

        assert_eq!(cli.server.as_deref(), Some("http://books.local"));
        match cli.command {
            Commands::Book {
                command: BookCommands::Create { title, fields },
            } => {
                assert_eq!(title, "Dune");
                assert_eq!(fields.author.as_deref(), Some("Frank Herbert"));
                assert_eq!(fields.published_at.as_deref(), Some("1965-08-01"));
                assert!(fields.genre.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_book_set_short_flags() {
        let cli = Cli::parse_from([
            "bms", "book", "set", "Dune", "-a", "Frank Herbert", "-g", "scifi", "-p",
            "1965-08-01", "-d", "Desert planet", "-e", "1st",
        ]);

        match cli.command {
            Commands::Book {
                command: BookCommands::Set { title, fields },
            } => {
                assert_eq!(title, "Dune");
                assert_eq!(fields.author.as_deref(), Some("Frank Herbert"));
                assert_eq!(fields.genre.as_deref(), Some("scifi"));
                assert_eq!(fields.published_at.as_deref(), Some("1965-08-01"));
                assert_eq!(fields.description.as_deref(), Some("Desert planet"));
                assert_eq!(fields.edition.as_deref(), Some("1st"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn collection_list_name_is_optional() {
        let cli = Cli::parse_from(["bms", "collection", "list"]);
        assert!(matches!(
            cli.command,
            Commands::Collection {
                command: CollectionCommands::List { name: None }
            }
        ));
    }
}
