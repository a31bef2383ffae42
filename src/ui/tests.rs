//! UI domain: tests for HUD labels.

use super::{mute_label, projects_found_label};
use crate::effects::AudioSettings;
use crate::interaction::BoxStats;

#[test]
fn test_projects_found_counts_completed_of_total() {
    let stats = BoxStats {
        inactive: 5,
        hit: 1,
        completed: 3,
    };
    assert_eq!(projects_found_label(&stats), "Projects found: 3/9");
}

#[test]
fn test_mute_label() {
    let mut settings = AudioSettings::default();
    assert_eq!(mute_label(&settings), "Sound 70% [M]");

    settings.toggle_mute();
    assert_eq!(mute_label(&settings), "Sound off [M]");
}
