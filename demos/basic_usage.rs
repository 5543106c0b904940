//! # Basic Usage Example
//!
//! Walks through the entity store against a running Stash server:
//! - Point lookups, narrow and complete
//! - Bounded searches and lazy streaming
//! - Populating missing fields and related records
//! - Inspecting and invalidating the cache
//!
//! Configure the server in `stashhaus.toml` or with `STASHHAUS_ENDPOINT` and
//! `STASHHAUS_API_KEY`, then run `cargo run --example basic_usage`.
//! Set `RUST_LOG=stashhaus=debug,entity_store=debug` to watch the cache at work.

use futures::StreamExt;
use stashhaus::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .init();

    println!("🚀 StashHaus Basic Usage Example");
    println!("=================================");

    // 1. Connect
    println!("\n📡 Step 1: Connecting");
    println!("---------------------");

    let stash = StashHaus::from_env()?;
    println!("✅ Connected to Stash {}", stash.server_version().await?);
    let store = stash.store();

    // 2. Point lookups
    println!("\n📖 Step 2: Looking records up");
    println!("------------------------------");

    match store.get::<Scene>("1", Some(&["title", "rating100"])).await {
        Some(scene) => {
            println!("📋 Scene 1: {:?} (rating {:?})", scene.title, scene.rating100);
            println!("   Received fields: {:?}", scene.received());
        }
        None => println!("❌ Scene 1 not found"),
    }

    // A second complete lookup is answered from the cache
    if let Some(scene) = store.get::<Scene>("1", None).await {
        println!("📋 Complete scene 1 has {} fields", scene.received().len());
    }

    // 3. Bounded search
    println!("\n🔎 Step 3: Searching");
    println!("--------------------");

    let filters = Filters::new()
        .with("rating100__gte", 80)
        .with("organized", true)
        .sort("date", SortDirection::Desc);

    match store.find::<Scene>(&filters).await {
        Ok(scenes) => {
            println!("✅ {} highly rated scenes", scenes.len());
            for scene in scenes.iter().take(5) {
                println!("  • {}: {:?}", scene.id(), scene.title);
            }
        }
        Err(StoreError::TooManyResults { count, .. }) => {
            println!("⚠️  {} matches is too many to load at once, streaming instead", count);
        }
        Err(e) => return Err(e.into()),
    }

    // 4. Streaming
    println!("\n🌊 Step 4: Streaming a large search");
    println!("-----------------------------------");

    let mut performers = Box::pin(store.find_iter::<Performer>(Filters::new().with("favorite", true))?);
    let mut seen = 0;
    while let Some(performer) = performers.next().await {
        let performer = performer?;
        seen += 1;
        if seen <= 3 {
            println!("  • {} ({} aliases)", performer.name, performer.alias_list.len());
        }
        if seen == 100 {
            println!("  … stopping after 100, no further pages are requested");
            break;
        }
    }
    println!("✅ Streamed {} favorite performers", seen);

    // 5. Population
    println!("\n🧩 Step 5: Populating related records");
    println!("-------------------------------------");

    if let Some(scene) = store.find_one::<Scene>(&Filters::new().with("studio__null", false)).await? {
        let scene = store.populate(scene, Some(&["studio", "performers"]), false).await;
        if let Some(studio) = &scene.studio {
            println!("🏢 Studio: {} ({:?})", studio.name, studio.url);
        }
        for performer in &scene.performers {
            println!("👤 {} from {:?}", performer.name, performer.country);
        }
    }

    // 6. Cache inspection
    println!("\n⚙️  Step 6: Cache inspection");
    println!("---------------------------");

    let stats = store.cache_stats();
    println!("📊 {} cached records", stats.total);
    for (type_name, count) in &stats.by_type {
        println!("  • {}: {}", type_name, count);
    }

    let untitled = store.filter::<Scene, _>(|scene| scene.title.is_none());
    println!("📋 {} cached scenes without a title", untitled.len());

    store.set_expiration::<Tag>(None);
    let dropped = store.invalidate_type::<Scene>();
    println!("🗑️  Dropped {} scenes, tags never expire now", dropped);

    println!("\n🎉 Basic Usage Demo Complete!");
    Ok(())
}
