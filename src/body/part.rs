//! Body part definitions
//!
//! Parts are totally ordered; left/right pairs sit next to each other so
//! sorted lists can merge them into one entry.

use serde::{Deserialize, Serialize};

/// An anatomical coverage region
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Torso,
    Head,
    Eyes,
    Mouth,
    ArmL,
    ArmR,
    HandL,
    HandR,
    LegL,
    LegR,
    FootL,
    FootR,
}

impl BodyPart {
    /// All body parts in display order
    pub fn all() -> &'static [BodyPart] {
        &[
            BodyPart::Torso,
            BodyPart::Head,
            BodyPart::Eyes,
            BodyPart::Mouth,
            BodyPart::ArmL,
            BodyPart::ArmR,
            BodyPart::HandL,
            BodyPart::HandR,
            BodyPart::LegL,
            BodyPart::LegR,
            BodyPart::FootL,
            BodyPart::FootR,
        ]
    }

    /// The mirrored part, or the part itself when it is unpaired
    pub fn opposite(&self) -> BodyPart {
        match self {
            BodyPart::ArmL => BodyPart::ArmR,
            BodyPart::ArmR => BodyPart::ArmL,
            BodyPart::HandL => BodyPart::HandR,
            BodyPart::HandR => BodyPart::HandL,
            BodyPart::LegL => BodyPart::LegR,
            BodyPart::LegR => BodyPart::LegL,
            BodyPart::FootL => BodyPart::FootR,
            BodyPart::FootR => BodyPart::FootL,
            other => *other,
        }
    }

    pub fn is_paired(&self) -> bool {
        self.opposite() != *self
    }

    /// Lowercase name, e.g. "left arm"
    pub fn name(&self) -> &'static str {
        match self {
            BodyPart::Torso => "torso",
            BodyPart::Head => "head",
            BodyPart::Eyes => "eyes",
            BodyPart::Mouth => "mouth",
            BodyPart::ArmL => "left arm",
            BodyPart::ArmR => "right arm",
            BodyPart::HandL => "left hand",
            BodyPart::HandR => "right hand",
            BodyPart::LegL => "left leg",
            BodyPart::LegR => "right leg",
            BodyPart::FootL => "left foot",
            BodyPart::FootR => "right foot",
        }
    }

    /// Name used as a sentence object; `both` names the merged pair
    pub fn name_accusative(&self, both: bool) -> &'static str {
        if !both || !self.is_paired() {
            return self.name();
        }
        match self {
            BodyPart::ArmL | BodyPart::ArmR => "arms",
            BodyPart::HandL | BodyPart::HandR => "hands",
            BodyPart::LegL | BodyPart::LegR => "legs",
            _ => "feet",
        }
    }

    /// Capitalized heading, e.g. "Left Arm" or "Arms"
    pub fn heading(&self, both: bool) -> String {
        self.name_accusative(both)
            .split(' ')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Body-part filter selected by a layering tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartFilter {
    /// No restriction
    All,
    Part(BodyPart),
}

impl PartFilter {
    /// Tabs in cycling order: every body part, then "All"
    pub fn tabs() -> Vec<PartFilter> {
        BodyPart::all()
            .iter()
            .copied()
            .map(PartFilter::Part)
            .chain(std::iter::once(PartFilter::All))
            .collect()
    }

    pub fn part(&self) -> Option<BodyPart> {
        match self {
            PartFilter::All => None,
            PartFilter::Part(bp) => Some(*bp),
        }
    }

    /// Whether `part` passes the filter
    pub fn admits(&self, part: BodyPart) -> bool {
        match self {
            PartFilter::All => true,
            PartFilter::Part(bp) => *bp == part,
        }
    }

    pub fn heading(&self) -> String {
        match self {
            PartFilter::All => "All".to_string(),
            PartFilter::Part(bp) => bp.heading(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites_are_symmetric() {
        for part in BodyPart::all() {
            assert_eq!(part.opposite().opposite(), *part);
        }
        assert_eq!(BodyPart::Torso.opposite(), BodyPart::Torso);
        assert!(BodyPart::FootL.is_paired());
    }

    #[test]
    fn test_pairs_sort_adjacent() {
        let mut parts = vec![BodyPart::ArmR, BodyPart::Torso, BodyPart::ArmL];
        parts.sort();
        assert_eq!(parts, vec![BodyPart::Torso, BodyPart::ArmL, BodyPart::ArmR]);
    }

    #[test]
    fn test_headings() {
        assert_eq!(BodyPart::ArmL.heading(false), "Left Arm");
        assert_eq!(BodyPart::FootR.heading(true), "Feet");
        assert_eq!(BodyPart::Torso.heading(true), "Torso");
    }

    #[test]
    fn test_tabs_end_with_all() {
        let tabs = PartFilter::tabs();
        assert_eq!(tabs.len(), BodyPart::all().len() + 1);
        assert_eq!(tabs[0], PartFilter::Part(BodyPart::Torso));
        assert_eq!(*tabs.last().unwrap(), PartFilter::All);
        assert!(PartFilter::All.admits(BodyPart::Eyes));
        assert!(!PartFilter::Part(BodyPart::Head).admits(BodyPart::Eyes));
    }
}
