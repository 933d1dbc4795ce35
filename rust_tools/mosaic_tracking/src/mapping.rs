use crate::error::{Result, TrackingError};
use log::{debug, warn};

pub const DISPLAY_MIN: i32 = 1;
pub const DISPLAY_MAX: i32 = 255;

/// One source image of the mosaic
#[derive(Debug, Clone, PartialEq)]
pub struct MappingEntry {
    pub tracking_id: i32,
    pub display_value: i32,
    pub image_name: String,
}

impl MappingEntry {
    /// `{id:03}/{display:03}      {name}`, the line printed per image
    pub fn format_line(&self) -> String {
        format!(
            "{:03}/{:03}      {}",
            self.tracking_id, self.display_value, self.image_name
        )
    }
}

/// Min-max normalize manifest positions `low..low + count` onto 1..=255.
///
/// A single position has no spread and maps to 1.
pub fn display_values(count: usize, low: i64) -> Vec<i32> {
    let original: Vec<i64> = (0..count as i64).map(|i| i + low).collect();
    let (Some(&min), Some(&max)) = (original.first(), original.last()) else {
        return Vec::new();
    };

    if max == min {
        return vec![DISPLAY_MIN; count];
    }

    let span = (max - min) as f64;
    let scale = (DISPLAY_MAX - DISPLAY_MIN) as f64;
    original
        .iter()
        .map(|&value| {
            let norm = (value - min) as f64 / span;
            (norm * scale + DISPLAY_MIN as f64).floor() as i32
        })
        .collect()
}

/// Join of tracking IDs, display values and manifest names
#[derive(Debug, Clone, Default)]
pub struct TrackingMap {
    entries: Vec<MappingEntry>,
}

impl TrackingMap {
    /// Pair the ascending unique IDs with the sliced manifest by position.
    /// Both sides must have the same length.
    pub fn build(unique_ids: &[i32], image_names: &[String], low: i64) -> Result<Self> {
        if unique_ids.len() != image_names.len() {
            return Err(TrackingError::IdCountMismatch {
                ids: unique_ids.len(),
                entries: image_names.len(),
            });
        }

        let displays = display_values(image_names.len(), low);
        let entries: Vec<MappingEntry> = unique_ids
            .iter()
            .zip(displays)
            .zip(image_names)
            .map(|((&tracking_id, display_value), name)| MappingEntry {
                tracking_id,
                display_value,
                image_name: name.clone(),
            })
            .collect();

        let misaligned = entries
            .iter()
            .filter(|e| e.tracking_id != e.display_value)
            .count();
        if misaligned > 0 {
            warn!(
                "{} of {} tracking IDs differ from their display value; names are joined by position",
                misaligned,
                entries.len()
            );
        }
        debug!("Built tracking map with {} entries", entries.len());

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn tracking_ids(&self) -> Vec<i32> {
        self.entries.iter().map(|e| e.tracking_id).collect()
    }

    /// Manifest name of a tracking ID
    pub fn image_name(&self, tracking_id: i32) -> Result<&str> {
        self.entries
            .iter()
            .find(|e| e.tracking_id == tracking_id)
            .map(|e| e.image_name.as_str())
            .ok_or(TrackingError::UnmappedTrackingId(tracking_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_two_entries_span_full_range() {
        assert_eq!(display_values(2, 3), vec![1, 255]);
    }

    #[test]
    fn test_single_entry_maps_to_one() {
        assert_eq!(display_values(1, 7), vec![1]);
        assert!(display_values(0, 7).is_empty());
    }

    #[test]
    fn test_display_values_monotonic_in_range() {
        for count in 1..300 {
            let values = display_values(count, 4);
            assert_eq!(values.len(), count);
            assert_eq!(values[0], DISPLAY_MIN);
            if count > 1 {
                assert_eq!(*values.last().unwrap(), DISPLAY_MAX);
            }
            assert!(values.windows(2).all(|w| w[0] <= w[1]));
            assert!(values.iter().all(|v| (DISPLAY_MIN..=DISPLAY_MAX).contains(v)));
        }
    }

    #[test]
    fn test_display_values_floor_scaled() {
        // (i / 2) * 254 + 1 -> 1, 128, 255
        assert_eq!(display_values(3, 10), vec![1, 128, 255]);
        // (i / 3) * 254 + 1 -> 1, 85.67, 170.33, 255
        assert_eq!(display_values(4, 0), vec![1, 85, 170, 255]);
    }

    #[test]
    fn test_build_pairs_by_position() {
        let map = TrackingMap::build(&[1, 2], &names(&["imgA", "imgB"]), 3).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.entries()[0].display_value, 1);
        assert_eq!(map.entries()[1].display_value, 255);
        assert_eq!(map.image_name(1).unwrap(), "imgA");
        assert_eq!(map.image_name(2).unwrap(), "imgB");
        assert_eq!(map.tracking_ids(), vec![1, 2]);
    }

    #[test]
    fn test_build_rejects_count_mismatch() {
        let err = TrackingMap::build(&[1, 2, 3], &names(&["imgA", "imgB"]), 3).unwrap_err();
        assert!(matches!(
            err,
            TrackingError::IdCountMismatch { ids: 3, entries: 2 }
        ));
    }

    #[test]
    fn test_unknown_id_is_an_error() {
        let map = TrackingMap::build(&[1], &names(&["imgA"]), 3).unwrap();
        assert!(matches!(
            map.image_name(9),
            Err(TrackingError::UnmappedTrackingId(9))
        ));
    }

    #[test]
    fn test_format_line() {
        let entry = MappingEntry {
            tracking_id: 2,
            display_value: 255,
            image_name: "imgB".to_string(),
        };
        assert_eq!(entry.format_line(), "002/255      imgB");
    }
}
