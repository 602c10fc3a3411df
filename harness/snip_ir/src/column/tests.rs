use super::*;

#[test]
fn test_new_clamps_inverted_range() {
    let range = ColumnRange::new(5, 2);
    assert_eq!(range.start, 5);
    assert_eq!(range.end, 5);
    assert_eq!(range.width(), 0);
}

#[test]
fn test_contains() {
    let range = ColumnRange::new(7, 11);
    assert!(!range.contains(6));
    assert!(range.contains(7));
    assert!(range.contains(10));
    assert!(!range.contains(11));
}

#[test]
fn test_overlaps() {
    let underline = ColumnRange::new(7, 11);
    assert!(underline.overlaps(ColumnRange::new(10, 14)));
    assert!(underline.overlaps(ColumnRange::new(1, 8)));
    assert!(!underline.overlaps(ColumnRange::new(11, 14)));
    assert!(!underline.overlaps(ColumnRange::new(1, 7)));
}

#[test]
fn test_zero_width_overlaps_its_column() {
    let underline = ColumnRange::new(7, 11);
    assert!(underline.overlaps(ColumnRange::new(9, 9)));
    assert!(!underline.overlaps(ColumnRange::new(11, 11)));
}

#[test]
fn test_display() {
    assert_eq!(ColumnRange::new(7, 11).to_string(), "7-10");
    assert_eq!(ColumnRange::with_width(3, 1).to_string(), "3");
}
