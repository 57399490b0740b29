//! Prints the annotations of the account's project that lie mostly inside a tile.
//!
//! The API key is read from `PROJECT_KIWI_API_KEY`. The tile address can be given as the first
//! argument, e.g. `cargo run --example annotations_for_tile -- 12/1051/1522`.

use projectkiwi::projectkiwi_types::TileIndex;
use projectkiwi::{Connector, KiwiError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let tile: TileIndex = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "12/1051/1522".to_owned())
        .parse()?;

    let connector = Connector::from_env()?;
    let annotations = match connector
        .get_annotations_for_tile(None, tile, 0.5, None)
        .await
    {
        Err(KiwiError::AmbiguousProject) => {
            let projects = connector.get_projects().await?;
            println!("Several projects found, using {}", projects[0]);
            connector
                .get_annotations_for_tile(Some(&projects[0]), tile, 0.5, None)
                .await?
        }
        result => result?,
    };

    println!("{} annotations in tile {tile}", annotations.len());
    for annotation in annotations {
        println!(
            "  {} {} ({} vertices)",
            annotation.id,
            annotation.label_name,
            annotation.coordinates.len()
        );
    }

    Ok(())
}
