//! Maps each command to exactly one HTTP request and a render rule.

use bms_api::{parse_date, Book};
use reqwest::Method;

use crate::commands::{BookCommands, BookFields, CollectionCommands, Commands};
use crate::error::ClientError;

/// How a successful envelope is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Render {
    /// Pretty-print the envelope's `data`
    pub json: bool,
    /// Fixed line printed after the data
    pub success: Option<&'static str>,
}

impl Render {
    const DATA: Render = Render {
        json: true,
        success: None,
    };

    const fn message(success: &'static str) -> Render {
        Render {
            json: false,
            success: Some(success),
        }
    }
}

/// A request ready to be sent to the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub method: Method,
    pub path: &'static str,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Book>,
    pub render: Render,
}

impl Plan {
    fn new(method: Method, path: &'static str, render: Render) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            body: None,
            render,
        }
    }

    /// Add a query parameter unless it is absent or blank.
    fn param(mut self, name: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.query.push((name, value.to_string()));
        }
        self
    }

    fn body(mut self, book: Book) -> Self {
        self.body = Some(book);
        self
    }
}

pub fn plan(command: &Commands) -> Result<Plan, ClientError> {
    match command {
        Commands::Book { command } => plan_book(command),
        Commands::Collection { command } => Ok(plan_collection(command)),
    }
}

fn plan_book(command: &BookCommands) -> Result<Plan, ClientError> {
    let plan = match command {
        BookCommands::Create { title, fields } => Plan::new(
            Method::POST,
            "/book/create",
            Render::message("Book created successfully"),
        )
        .body(book(title, fields)?),
        BookCommands::Set { title, fields } => Plan::new(
            Method::PUT,
            "/book/set",
            Render::message("Book updated successfully"),
        )
        .body(book(title, fields)?),
        BookCommands::Remove { title } => Plan::new(
            Method::DELETE,
            "/book/remove",
            Render::message("Book removed successfully"),
        )
        .param("title", Some(title.as_str())),
        BookCommands::List {
            title,
            author,
            genre,
            publish_start,
            publish_end,
        } => {
            // Catch malformed dates before the round trip.
            for (field, value) in [("publish_start", publish_start), ("publish_end", publish_end)] {
                if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                    parse_date(field, value)?;
                }
            }

            Plan::new(Method::GET, "/book/list", Render::DATA)
                .param("title", title.as_deref())
                .param("author", author.as_deref())
                .param("genre", genre.as_deref())
                .param("publish_start", publish_start.as_deref())
                .param("publish_end", publish_end.as_deref())
        }
    };

    Ok(plan)
}

fn plan_collection(command: &CollectionCommands) -> Plan {
    match command {
        CollectionCommands::Create { name, description } => Plan::new(
            Method::POST,
            "/collection/create",
            Render::message("Collection created successfully"),
        )
        .param("collection_name", Some(name.as_str()))
        .param("description", description.as_deref()),
        CollectionCommands::Remove { name } => Plan::new(
            Method::DELETE,
            "/collection/remove",
            Render::message("Collection removed successfully"),
        )
        .param("collection_name", Some(name.as_str())),
        CollectionCommands::AddBook { collection, title } => Plan::new(
            Method::POST,
            "/collection/add-book",
            Render::message("Book added to collection successfully"),
        )
        .param("collection_name", Some(collection.as_str()))
        .param("book_title", Some(title.as_str())),
        CollectionCommands::RemoveBook { collection, title } => Plan::new(
            Method::DELETE,
            "/collection/remove-book",
            Render::message("Book removed from collection successfully"),
        )
        .param("collection_name", Some(collection.as_str()))
        .param("book_title", Some(title.as_str())),
        CollectionCommands::List { name: None } => {
            Plan::new(Method::GET, "/collection/list", Render::DATA)
        }
        CollectionCommands::List { name: Some(name) } => {
            Plan::new(Method::GET, "/collection/list/books", Render::DATA)
                .param("collection_name", Some(name.as_str()))
        }
    }
}

fn book(title: &str, fields: &BookFields) -> Result<Book, ClientError> {
    let published_at = match fields.published_at.as_deref() {
        Some(value) if !value.trim().is_empty() => Some(parse_date("published_at", value)?),
        _ => None,
    };

    Ok(Book {
        title: title.to_string(),
        author: fields.author.clone(),
        published_at,
        edition: fields.edition.clone(),
        description: fields.description.clone(),
        genre: fields.genre.clone(),
    })
}
