use shared_types::{ContactSource, IngestionError, Origin, SourceRecord};
use std::fs;
use std::path::{Path, PathBuf};

/// Reads `.vcf` address-book exports into [`SourceRecord`]s.
pub struct VcardExtractor {
    origin: Origin,
}

#[derive(Default)]
struct CardFields {
    family: Option<String>,
    given: Option<String>,
    formatted: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    organization: Option<String>,
    title: Option<String>,
    note: Option<String>,
    url: Option<String>,
    categories: Vec<String>,
}

impl VcardExtractor {
    pub fn new(origin: Origin) -> Self {
        Self { origin }
    }

    pub fn parse(&self, path: &Path) -> Result<Vec<SourceRecord>, IngestionError> {
        if !path.is_file() {
            return Err(IngestionError::SourceNotFound(path.to_path_buf()));
        }

        let content = fs::read(path)?;
        self.parse_bytes(&content, &path.display().to_string())
    }

    pub fn parse_bytes(
        &self,
        content: &[u8],
        label: &str,
    ) -> Result<Vec<SourceRecord>, IngestionError> {
        let content_str = std::str::from_utf8(content)
            .map_err(|e| IngestionError::ParseError(format!("{label}: {e}")))?;
        let content_str = content_str.trim_start_matches('\u{feff}');

        let mut records = Vec::new();
        let mut skipped = 0;

        for vcard in split_cards(content_str) {
            match self.parse_vcard(&vcard) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} vCards without a name in {}", skipped, label);
        }
        tracing::info!("Parsed {} {} contacts from {}", records.len(), self.origin, label);

        Ok(records)
    }

    fn parse_vcard(&self, lines: &[String]) -> Option<SourceRecord> {
        let mut card = CardFields::default();

        for line in lines {
            let Some((name, value)) = line.split_once(':') else {
                continue;
            };
            // Drop parameters (EMAIL;TYPE=work) and groups (item1.EMAIL).
            let property = name.split(';').next().unwrap_or_default();
            let property = property.rsplit('.').next().unwrap_or_default();
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match property.to_ascii_uppercase().as_str() {
                "N" if card.family.is_none() && card.given.is_none() => {
                    let parts = split_escaped(value, ';');
                    card.family = parts.first().cloned().filter(|s| !s.is_empty());
                    card.given = parts.get(1).cloned().filter(|s| !s.is_empty());
                }
                "FN" => set_once(&mut card.formatted, unescape(value)),
                "EMAIL" => set_once(&mut card.email, unescape(value)),
                "TEL" => set_once(&mut card.phone, unescape(value)),
                "ORG" => {
                    let org = split_escaped(value, ';').into_iter().next().unwrap_or_default();
                    set_once(&mut card.organization, org);
                }
                "TITLE" => set_once(&mut card.title, unescape(value)),
                "NOTE" => set_once(&mut card.note, unescape(value)),
                "URL" => set_once(&mut card.url, unescape(value)),
                "CATEGORIES" if card.categories.is_empty() => {
                    card.categories = split_escaped(value, ',')
                        .into_iter()
                        .filter(|s| !s.is_empty())
                        .collect();
                }
                _ => {}
            }
        }

        let (first_name, last_name) = match (card.given, card.family) {
            (None, None) => split_formatted_name(card.formatted.as_deref()?),
            (given, family) => (given.unwrap_or_default(), family.unwrap_or_default()),
        };

        let record = SourceRecord {
            first_name,
            last_name,
            email: card.email,
            phone: card.phone,
            company: card.organization,
            role: card.title,
            notes: match self.origin {
                Origin::Primary => card.note,
                Origin::Secondary => None,
            },
            profile_url: match self.origin {
                Origin::Primary => None,
                Origin::Secondary => card.url,
            },
            labels: card.categories,
            origin: self.origin,
        };

        record.is_valid().then_some(record)
    }
}

fn set_once(slot: &mut Option<String>, value: String) {
    if slot.is_none() && !value.is_empty() {
        *slot = Some(value);
    }
}

/// Unfold continuation lines and group them per card.
fn split_cards(content: &str) -> Vec<Vec<String>> {
    let mut cards = Vec::new();
    let mut current: Option<Vec<String>> = None;

    for raw in content.lines() {
        let raw = raw.trim_end_matches('\r');

        if raw.starts_with(' ') || raw.starts_with('\t') {
            if let Some(last) = current.as_mut().and_then(|lines| lines.last_mut()) {
                last.push_str(&raw[1..]);
            }
            continue;
        }

        let line = raw.trim();
        if line.eq_ignore_ascii_case("BEGIN:VCARD") {
            if let Some(card) = current.take() {
                cards.push(card);
            }
            current = Some(Vec::new());
        } else if line.eq_ignore_ascii_case("END:VCARD") {
            if let Some(card) = current.take() {
                cards.push(card);
            }
        } else if let Some(lines) = current.as_mut() {
            lines.push(line.to_string());
        }
    }

    if let Some(card) = current.take() {
        cards.push(card);
    }

    cards
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') | Some('N') => out.push('\n'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out.trim().to_string()
}

/// Split on `sep`, honouring backslash escapes, and unescape each part.
fn split_escaped(value: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut escaped = false;

    for c in value.chars() {
        if escaped {
            current.push('\\');
            current.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == sep {
            parts.push(unescape(&current));
            current.clear();
        } else {
            current.push(c);
        }
    }
    parts.push(unescape(&current));

    parts
}

/// `"Jane Q Doe"` becomes `("Jane Q", "Doe")`; a single word is a first name.
fn split_formatted_name(formatted: &str) -> (String, String) {
    let formatted = formatted.trim();
    match formatted.rsplit_once(char::is_whitespace) {
        Some((first, last)) => (first.trim().to_string(), last.to_string()),
        None => (formatted.to_string(), String::new()),
    }
}

/// A `.vcf` file on disk, ready to be handed to the CLI as a [`ContactSource`].
pub struct VcardFile {
    path: PathBuf,
    extractor: VcardExtractor,
}

impl VcardFile {
    pub fn new(path: impl Into<PathBuf>, origin: Origin) -> Self {
        Self {
            path: path.into(),
            extractor: VcardExtractor::new(origin),
        }
    }
}

impl ContactSource for VcardFile {
    fn load(&self) -> Result<Vec<SourceRecord>, IngestionError> {
        self.extractor.parse(&self.path)
    }

    fn origin(&self) -> Origin {
        self.extractor.origin
    }

    fn describe(&self) -> String {
        format!("vCard export {}", self.path.display())
    }
}
