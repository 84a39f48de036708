// this_file: crates/gemtype-export/src/json.rs

//! JSON export of link boxes
//!
//! Gives tools outside the engine the clickable regions of a page.

use serde::{Deserialize, Serialize};

use gemtype_core::{
    error::{ExportError, Result},
    types::LinkBox,
};

/// One link box as it appears in JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub target: String,
}

impl From<&LinkBox> for LinkRecord {
    fn from(link: &LinkBox) -> Self {
        Self {
            x: link.rect.x,
            y: link.rect.y,
            width: link.rect.width,
            height: link.rect.height,
            target: link.target.clone(),
        }
    }
}

/// Serialize link boxes as a JSON array
pub fn encode_links(links: &[LinkBox], pretty: bool) -> Result<Vec<u8>> {
    let records: Vec<LinkRecord> = links.iter().map(LinkRecord::from).collect();
    let json = if pretty {
        serde_json::to_string_pretty(&records)
    } else {
        serde_json::to_string(&records)
    }
    .map_err(|e| ExportError::EncodingFailed(e.to_string()))?;

    Ok(json.into_bytes())
}
