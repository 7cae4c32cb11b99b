//! Dictionary and pattern based entity recognizer.
//!
//! Needs no model files, which makes it the default backend and a
//! deterministic stand-in wherever a statistical model is unavailable.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use super::{resolve_overlaps, Entity, EntityLabel, EntityRecognizer};
use crate::error::RecognitionError;

/// UK places known to the recognizer out of the box.
const UK_PLACES: &[&str] = &[
    // Nations
    "England", "Scotland", "Wales", "Northern Ireland", "United Kingdom",
    // Cities and towns
    "London", "Birmingham", "Manchester", "Leeds", "Liverpool", "Sheffield", "Bristol",
    "Newcastle upon Tyne", "Nottingham", "Leicester", "Coventry", "Bradford", "Southampton",
    "Portsmouth", "Brighton", "Plymouth", "Reading", "Oxford", "Cambridge", "York", "Bath",
    "Exeter", "Norwich", "Derby", "Stoke-on-Trent", "Wolverhampton", "Sunderland",
    "Milton Keynes", "Northampton", "Luton", "Swindon", "Gloucester", "Cheltenham",
    "Ipswich", "Colchester", "Chelmsford", "Canterbury", "Maidstone", "Guildford",
    "Winchester", "Salisbury", "Lincoln", "Carlisle", "Durham", "Lancaster", "Preston",
    "Blackpool", "Bolton", "Wigan", "Warrington", "Chester", "Shrewsbury", "Hereford",
    "Worcester", "Harrogate", "Cardiff", "Swansea", "Newport", "Edinburgh", "Glasgow",
    "Aberdeen", "Dundee", "Inverness", "Belfast",
    // Counties
    "Kent", "Surrey", "Essex", "East Sussex", "West Sussex", "Hampshire", "Dorset", "Devon",
    "Cornwall", "Somerset", "Wiltshire", "Oxfordshire", "Berkshire", "Buckinghamshire",
    "Hertfordshire", "Bedfordshire", "Cambridgeshire", "Norfolk", "Suffolk", "Lincolnshire",
    "North Yorkshire", "West Yorkshire", "South Yorkshire", "East Riding of Yorkshire",
    "Lancashire", "Cumbria", "Northumberland", "Cheshire", "Derbyshire", "Nottinghamshire",
    "Leicestershire", "Warwickshire", "Staffordshire", "Shropshire", "Worcestershire",
    "Herefordshire", "Gloucestershire",
];

lazy_static! {
    // Name after an honorific; the honorific itself is not part of the span.
    static ref TITLED_PERSON: Regex = Regex::new(
        r"\b(?:Mr|Mrs|Ms|Miss|Mx|Dr|Sir|Dame|Prof)\.?[ \t]+((?:[A-Z]\.?[ \t]+)*[A-Z](?:[a-z]+|'[A-Z][a-z]+)(?:-[A-Z][a-z]+)?(?:[ \t]+[A-Z](?:[a-z]+|'[A-Z][a-z]+)(?:-[A-Z][a-z]+)?)*)"
    ).unwrap();

    // Name following an applicant/agent label, on the same or the next line.
    static ref LABELED_PERSON: Regex = Regex::new(
        r"(?m)^[ \t]*(?:Applicant|Agent)(?:[ \t]+Name)?[ \t]*:[ \t]*(?:\r?\n[ \t]*)?(?:(?:Mr|Mrs|Ms|Miss|Mx|Dr)\.?[ \t]+)?([A-Z](?:[a-z]+|'[A-Z][a-z]+)(?:[ \t]+[A-Z](?:[a-z]+|'[A-Z][a-z]+)(?:-[A-Z][a-z]+)?)+)"
    ).unwrap();

    // Capitalized phrase ending in a thoroughfare or building keyword.
    static ref FACILITY: Regex = Regex::new(
        r"\b((?:[A-Z][A-Za-z'\-]*[ \t]+){0,3}[A-Z][A-Za-z'\-]*[ \t]+(?:Road|Street|Lane|Avenue|Close|Drive|Way|Crescent|Place|Square|Hall|Centre|Park|Station|Church|School|House|Farm|Court|Mill|Barn|Cottage))\b"
    ).unwrap();
}

/// Recognizer combining a place gazetteer with person and facility patterns.
pub struct GazetteerRecognizer {
    places: Regex,
}

impl GazetteerRecognizer {
    /// Create a recognizer with the built-in UK place list.
    pub fn new() -> Self {
        Self::with_place_list(UK_PLACES.iter().map(|p| p.to_string()).collect())
    }

    /// Extend the place list.
    pub fn with_places(self, extra: impl IntoIterator<Item = String>) -> Self {
        let extra: Vec<String> = extra.into_iter().collect();
        if extra.is_empty() {
            return self;
        }
        let mut places: Vec<String> = UK_PLACES.iter().map(|p| p.to_string()).collect();
        places.extend(extra);
        Self::with_place_list(places)
    }

    fn with_place_list(mut places: Vec<String>) -> Self {
        places.retain(|p| !p.trim().is_empty());
        // Longest first so that "West Yorkshire" wins over "York".
        places.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        places.dedup();

        let alternation = places
            .iter()
            .map(|p| regex::escape(p.trim()))
            .collect::<Vec<_>>()
            .join("|");
        let places = Regex::new(&format!(r"\b(?:{})\b", alternation)).unwrap();

        Self { places }
    }

    fn capture_spans(pattern: &Regex, text: &str, label: EntityLabel) -> Vec<Entity> {
        pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| Entity::new(m.as_str(), label.clone(), m.start(), m.end()))
            .collect()
    }
}

impl Default for GazetteerRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRecognizer for GazetteerRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, RecognitionError> {
        let mut entities = Vec::new();

        entities.extend(Self::capture_spans(&TITLED_PERSON, text, EntityLabel::Person));
        entities.extend(Self::capture_spans(&LABELED_PERSON, text, EntityLabel::Person));
        entities.extend(Self::capture_spans(&FACILITY, text, EntityLabel::Facility));
        entities.extend(self.places.find_iter(text).map(|m| {
            Entity::new(m.as_str(), EntityLabel::GeoPoliticalEntity, m.start(), m.end())
        }));

        let entities = resolve_overlaps(entities);
        trace!("Gazetteer recognized {} entities", entities.len());
        Ok(entities)
    }

    fn name(&self) -> &str {
        "gazetteer"
    }
}
