//! Links to the day's passage in an online Bible.

use serde::{Deserialize, Serialize};

use crate::error::Result;

const BIBLE_GATEWAY_URL: &str = "https://www.biblegateway.com/passage/";
const SEARCH_URL: &str = "https://www.google.com/search";

const SUNDAY_QUERY: &str = "meditação e oração bíblica";
const CHRISTMAS_QUERY: &str =
    "Evangelhos nascimento de Jesus Lucas 2 Mateus 1 profecias do Messias Isaías 9";

/// Translation used for passage links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BibleVersion {
    /// Almeida Revista e Corrigida
    Arc,
    /// Nova Versão Internacional
    #[default]
    Nvi,
}

impl BibleVersion {
    /// BibleGateway's code for this translation.
    pub fn gateway_code(self) -> &'static str {
        match self {
            BibleVersion::Arc => "ARC",
            BibleVersion::Nvi => "NVI-PT",
        }
    }
}

impl std::str::FromStr for BibleVersion {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arc" => Ok(BibleVersion::Arc),
            "nvi" => Ok(BibleVersion::Nvi),
            other => Err(format!("unknown Bible version '{other}', expected arc or nvi")),
        }
    }
}

fn search_url(query: &str) -> String {
    format!("{SEARCH_URL}?q={}", urlencoding::encode(query))
}

/// URL for a day's reading.
///
/// Sundays and the Christmas reading point to a web search instead of a
/// single passage.
pub fn reading_url(reference: &str, is_sunday: bool, version: BibleVersion) -> String {
    if is_sunday {
        return search_url(SUNDAY_QUERY);
    }
    let reference = reference.trim();
    if reference.to_lowercase().contains("natal") {
        return search_url(CHRISTMAS_QUERY);
    }
    format!(
        "{BIBLE_GATEWAY_URL}?search={}&version={}",
        urlencoding::encode(reference),
        version.gateway_code()
    )
}

/// Open `url` with the system's default handler.
pub fn open_in_browser(url: &str) -> Result<()> {
    tracing::debug!(url, "opening passage in browser");
    open::that(url)?;
    Ok(())
}
