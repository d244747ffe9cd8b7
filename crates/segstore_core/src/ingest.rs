//! Conversion of loosely typed input into segments.
//!
//! Store constructors accept anything convertible into the segment type.
//! The lenient path drops elements that fail to convert; the strict path
//! reports the first one.

use crate::error::{StoreError, StoreResult};
use crate::segment::Segment;
use std::fmt;
use tracing::debug;

/// Converts `items`, silently keeping only the ones that conform.
pub(crate) fn collect_conforming<S, T, I>(items: I) -> Vec<S>
where
    S: Segment + TryFrom<T>,
    I: IntoIterator<Item = T>,
{
    let mut dropped = 0usize;
    let segments: Vec<S> = items
        .into_iter()
        .filter_map(|item| match S::try_from(item) {
            Ok(segment) => Some(segment),
            Err(_) => {
                dropped += 1;
                None
            }
        })
        .collect();

    if dropped > 0 {
        debug!(
            kept = segments.len(),
            dropped, "dropped non-conforming elements during ingestion"
        );
    }
    segments
}

/// Converts `items`, failing on the first element that does not conform.
pub(crate) fn collect_strict<S, T, I>(items: I) -> StoreResult<Vec<S>>
where
    S: Segment + TryFrom<T>,
    <S as TryFrom<T>>::Error: fmt::Display,
    I: IntoIterator<Item = T>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            S::try_from(item).map_err(|err| {
                StoreError::invalid_argument(format!("element {index} is not a segment: {err}"))
            })
        })
        .collect()
}
