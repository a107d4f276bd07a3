// Entity classifier: runs the tagger and sorts spans into three buckets.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::ner::{Entity, EntityRecognizer};

/// Output record of classification. Spans keep discovery order; no dedup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBuckets {
    pub features: Vec<String>,
    pub platforms: Vec<String>,
    pub goals: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Features,
    Platforms,
    Goals,
}

/// Static label table. Anything not listed is dropped.
pub fn bucket_for(label: &str) -> Option<Bucket> {
    match label {
        "PRODUCT" => Some(Bucket::Features),
        "GPE" | "LOC" => Some(Bucket::Platforms),
        "ORG" => Some(Bucket::Goals),
        _ => None,
    }
}

impl EntityBuckets {
    pub fn from_entities(mut entities: Vec<Entity>) -> Self {
        // Stable sort: entities without offsets keep the tagger's order.
        if entities.iter().all(|e| e.char_start().is_some()) {
            entities.sort_by_key(|e| e.char_start());
        }

        let mut buckets = EntityBuckets::default();
        for entity in entities {
            match bucket_for(&entity.label) {
                Some(Bucket::Features) => buckets.features.push(entity.text),
                Some(Bucket::Platforms) => buckets.platforms.push(entity.text),
                Some(Bucket::Goals) => buckets.goals.push(entity.text),
                None => {}
            }
        }
        buckets
    }

    pub fn has_features(&self) -> bool {
        !self.features.is_empty()
    }
}

pub async fn classify(
    text: &str,
    recognizer: &dyn EntityRecognizer,
) -> Result<EntityBuckets, AppError> {
    let entities = recognizer.recognize(text).await?;
    Ok(EntityBuckets::from_entities(entities))
}
