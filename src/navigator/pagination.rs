//! Pagination indicator: a read-only view of `(current, count)`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMarker {
    pub index: usize,
    pub active: bool,
}

/// One marker per entry, with the current one highlighted.
///
/// Empty when there is nothing to page between (zero or one entry).
pub fn pagination(current: Option<usize>, count: usize) -> Vec<PageMarker> {
    if count <= 1 {
        return Vec::new();
    }
    (0..count)
        .map(|index| PageMarker {
            index,
            active: current == Some(index),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_for_single_entry() {
        assert!(pagination(Some(0), 1).is_empty());
        assert!(pagination(None, 0).is_empty());
    }

    #[test]
    fn test_exactly_one_active() {
        let markers = pagination(Some(2), 4);
        assert_eq!(markers.len(), 4);
        let active: Vec<usize> = markers.iter().filter(|m| m.active).map(|m| m.index).collect();
        assert_eq!(active, vec![2]);
    }
}
