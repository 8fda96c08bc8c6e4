use anyhow::Context;

use crate::config::AppConfig;
use crate::database;

const AUTHORS: [&str; 5] = [
    "Haruki Murakami",
    "Fyodor Dostoevsky",
    "Franz Kafka",
    "Albert Camus",
    "F. Scott Fitzgerald",
];

const BOOKS: [(&str, &str); 15] = [
    ("Sputnik Sweetheart", "Haruki Murakami"),
    ("Dance Dance Dance", "Haruki Murakami"),
    ("After Dark", "Haruki Murakami"),
    ("The House of the Dead", "Fyodor Dostoevsky"),
    ("White Nights", "Fyodor Dostoevsky"),
    ("Demons", "Fyodor Dostoevsky"),
    ("The Metamorphosis", "Franz Kafka"),
    ("The Trial", "Franz Kafka"),
    ("Letters to Milena", "Franz Kafka"),
    ("The Fall", "Albert Camus"),
    ("The Stranger", "Albert Camus"),
    ("The Rebel", "Albert Camus"),
    ("The Last Tycoon", "F. Scott Fitzgerald"),
    ("Tender Is the Night", "F. Scott Fitzgerald"),
    ("The Great Gatsby", "F. Scott Fitzgerald"),
];

pub async fn handle() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let pool = database::connect(&config.database)
        .await
        .context("database connection failed")?;
    database::migrate(&pool).await.context("migrations failed")?;

    for name in AUTHORS {
        sqlx::query("INSERT INTO authors (name) VALUES ($1)")
            .bind(name)
            .execute(&pool)
            .await
            .with_context(|| format!("failed to insert author {name}"))?;
    }

    for (title, author) in BOOKS {
        sqlx::query("INSERT INTO books (title, author_id) SELECT $1, id FROM authors WHERE name = $2")
            .bind(title)
            .bind(author)
            .execute(&pool)
            .await
            .with_context(|| format!("failed to insert book {title}"))?;
    }

    println!("seed data inserted");
    Ok(())
}
