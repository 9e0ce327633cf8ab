//! Table definitions. Modules hand these to the migration runner.

pub const BOOKS: &str = r#"
    CREATE TABLE IF NOT EXISTS books (
        title        TEXT NOT NULL PRIMARY KEY CHECK (title <> ''),
        author       TEXT,
        published_at TEXT,
        edition      TEXT,
        description  TEXT,
        genre        TEXT
    );
"#;

pub const COLLECTIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS collections (
        name        TEXT NOT NULL PRIMARY KEY CHECK (name <> ''),
        description TEXT
    );
"#;

/// No ON DELETE CASCADE: removal handlers clear memberships themselves.
pub const SUBSCRIPTIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS collection_subscriptions (
        book_title      TEXT NOT NULL,
        collection_name TEXT NOT NULL,
        PRIMARY KEY (book_title, collection_name),
        FOREIGN KEY (book_title) REFERENCES books (title),
        FOREIGN KEY (collection_name) REFERENCES collections (name)
    );
    CREATE INDEX IF NOT EXISTS collection_subscriptions_collection
        ON collection_subscriptions (collection_name);
"#;
