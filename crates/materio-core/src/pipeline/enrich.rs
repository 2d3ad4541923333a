//! Image enricher: attaches an illustrative image URL (or the absence
//! marker) to each parsed record.
//!
//! Per-record image requests are independent, so they fan out with a
//! bounded concurrency ceiling. Results are reassembled by original record
//! index; completion order never changes record order.

use futures::stream::{self, StreamExt};

use crate::gateway::Gateway;
use crate::record::{ImageRef, MaterialRecordSet};

/// Request an image for every record and write each `image` field once.
///
/// A failed or empty image result becomes [`ImageRef::Unavailable`]; image
/// trouble is never escalated, a set with zero images is a valid result.
pub async fn enrich_images(
    gateway: &dyn Gateway,
    records: &mut MaterialRecordSet,
    concurrency: usize,
) {
    if records.is_empty() {
        return;
    }
    let concurrency = concurrency.max(1);

    let names: Vec<(usize, String)> = records
        .iter()
        .enumerate()
        .map(|(idx, r)| (idx, r.name.clone()))
        .collect();

    let fetched: Vec<(usize, ImageRef)> = stream::iter(names)
        .map(|(idx, name)| async move {
            let image = fetch_image(gateway, &name).await;
            (idx, image)
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    // Index-keyed reassembly: arrival order is irrelevant.
    let slots = records.records_mut();
    for (idx, image) in fetched {
        slots[idx].image = image;
    }
}

async fn fetch_image(gateway: &dyn Gateway, name: &str) -> ImageRef {
    match gateway.generate_image(name).await {
        Ok(url) if !url.trim().is_empty() => ImageRef::Url(url),
        Ok(_) => {
            tracing::warn!(material = %name, "image service returned an empty URL");
            ImageRef::Unavailable
        }
        Err(e) => {
            tracing::warn!(material = %name, error = %e, "image generation failed");
            ImageRef::Unavailable
        }
    }
}
