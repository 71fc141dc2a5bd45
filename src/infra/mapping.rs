//! Field mapping and validation from raw records to domain entities.

use super::records::{RawRecord, decode_record, split_records, str_field};
use crate::domain::{Container, Image, canonical_state};
use tracing::{debug, warn};

/// Builds a container from a record, or `None` when `id` or `name` is
/// missing.
pub fn container_from_record(record: &RawRecord) -> Option<Container> {
    let id = str_field(record, "id");
    let name = str_field(record, "name");
    let image = str_field(record, "image");
    let raw_state = str_field(record, "state");

    let missing = missing_fields(&[("id", id.as_str()), ("name", name.as_str())]);
    if !missing.is_empty() {
        warn!(
            "Container record missing required field(s): {}",
            missing.join(", ")
        );
        return None;
    }

    let state = canonical_state(&raw_state).to_string();
    debug!("Parsed container: id={id}, name={name}, image={image}, state={raw_state}->{state}");

    Some(Container {
        id,
        name,
        image,
        state,
    })
}

/// Builds an image from a record, or `None` when `id` is missing.
pub fn image_from_record(record: &RawRecord) -> Option<Image> {
    let id = str_field(record, "id");
    let name = str_field(record, "name");
    let tag = str_field(record, "tag");

    if id.is_empty() {
        warn!("Image record missing required field(s): id");
        return None;
    }

    debug!("Parsed image: id={id}, name={name}, tag={tag}");
    Some(Image { id, name, tag })
}

/// Parses JSON Lines output from the container listing command.
pub fn parse_container_list(output: &str) -> Vec<Container> {
    parse_list(output, container_from_record)
}

/// Parses JSON Lines output from the image listing command.
pub fn parse_image_list(output: &str) -> Vec<Image> {
    parse_list(output, image_from_record)
}

fn parse_list<T>(output: &str, map: impl Fn(&RawRecord) -> Option<T>) -> Vec<T> {
    split_records(output)
        .filter_map(decode_record)
        .filter_map(|record| map(&record))
        .collect()
}

fn missing_fields<'a>(fields: &[(&'a str, &str)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| *key)
        .collect()
}
