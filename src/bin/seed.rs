use focus_studio_api::{
    config::AppConfig,
    db::{connect_store, run_migrations},
    models::{CLASS_APPROVED, CLASS_PENDING},
    store::{CLASSES, INSTRUCTORS, MongoStore},
};
use mongodb::bson::{Document, doc};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let store = connect_store(&config.mongodb_uri, &config.database_name).await?;
    // Ensure indexes are applied.
    run_migrations(&store).await?;

    let instructors = seed_if_empty(&store, INSTRUCTORS, demo_instructors()).await?;
    let classes = seed_if_empty(&store, CLASSES, demo_classes()).await?;

    println!("Seed completed. Instructors inserted: {instructors}, classes inserted: {classes}");
    Ok(())
}

async fn seed_if_empty(
    store: &MongoStore,
    collection: &str,
    docs: Vec<Document>,
) -> anyhow::Result<usize> {
    let collection = store.database().collection::<Document>(collection);
    if collection.estimated_document_count().await? > 0 {
        return Ok(0);
    }
    let result = collection.insert_many(docs).await?;
    Ok(result.inserted_ids.len())
}

fn demo_instructors() -> Vec<Document> {
    vec![
        doc! {
            "name": "Maya Torres",
            "email": "maya@focusstudio.dev",
            "image": "https://images.focusstudio.dev/maya.jpg",
            "specialty": "Contemporary",
            "classes_taken": 4,
        },
        doc! {
            "name": "Jonah Reed",
            "email": "jonah@focusstudio.dev",
            "image": "https://images.focusstudio.dev/jonah.jpg",
            "specialty": "Hip Hop",
            "classes_taken": 3,
        },
    ]
}

fn demo_classes() -> Vec<Document> {
    vec![
        doc! {
            "name": "Contemporary Foundations",
            "instructor": "Maya Torres",
            "email": "maya@focusstudio.dev",
            "price": 49.0,
            "available_seat": 20,
            "status": CLASS_APPROVED,
        },
        doc! {
            "name": "Hip Hop Grooves",
            "instructor": "Jonah Reed",
            "email": "jonah@focusstudio.dev",
            "price": 39.5,
            "available_seat": 15,
            "status": CLASS_PENDING,
        },
    ]
}
