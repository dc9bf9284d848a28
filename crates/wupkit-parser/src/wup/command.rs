//! Command vocabulary.

use serde::{Deserialize, Serialize};

use crate::model::{Layer, MemberKind, Orientation, PlateRole};

/// Every command the model builder understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    Wall,
    ModuleBegin,
    ModuleEnd,
    VerticalMember,
    HorizontalMember,
    TopPlate,
    BottomPlate,
    RoutingBegin,
    CircleCut,
    SheathingOuter,
    SheathingInner,
    Point,
    Curve,
    NailRow,
    Drill,
}

impl CommandKind {
    pub const ALL: [CommandKind; 15] = [
        Self::Wall,
        Self::ModuleBegin,
        Self::ModuleEnd,
        Self::VerticalMember,
        Self::HorizontalMember,
        Self::TopPlate,
        Self::BottomPlate,
        Self::RoutingBegin,
        Self::CircleCut,
        Self::SheathingOuter,
        Self::SheathingInner,
        Self::Point,
        Self::Curve,
        Self::NailRow,
        Self::Drill,
    ];

    /// Resolve a command word, ignoring case
    pub fn lookup(word: &str) -> Option<Self> {
        let word = word.trim();
        Self::ALL.into_iter().find(|kind| {
            kind.mnemonic().eq_ignore_ascii_case(word)
                || kind.aliases().iter().any(|a| a.eq_ignore_ascii_case(word))
        })
    }

    /// Short machine word
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Wall => "ELM",
            Self::ModuleBegin => "MODUL",
            Self::ModuleEnd => "ENDMODUL",
            Self::VerticalMember => "QS",
            Self::HorizontalMember => "LS",
            Self::TopPlate => "OG",
            Self::BottomPlate => "UG",
            Self::RoutingBegin => "PAF",
            Self::CircleCut => "KRS",
            Self::SheathingOuter => "PLA",
            Self::SheathingInner => "PLI",
            Self::Point => "PP",
            Self::Curve => "KB",
            Self::NailRow => "NR",
            Self::Drill => "BOY",
        }
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Wall => &["wall-define"],
            Self::ModuleBegin => &["module-begin"],
            Self::ModuleEnd => &["module-end"],
            Self::VerticalMember => &["vertical-member"],
            Self::HorizontalMember => &["horizontal-member"],
            Self::TopPlate => &["top-plate"],
            Self::BottomPlate => &["bottom-plate"],
            Self::RoutingBegin => &["routing-begin"],
            Self::CircleCut => &["circle-cut"],
            Self::SheathingOuter => &["sheathing-begin", "sheathing-outer"],
            Self::SheathingInner => &["sheathing-inner"],
            Self::Point => &["point"],
            Self::Curve => &["curve"],
            Self::NailRow => &["nail-row"],
            Self::Drill => &["drill-op"],
        }
    }

    /// Minimum number of numeric parameters
    pub fn min_params(&self) -> usize {
        match self {
            Self::ModuleEnd | Self::RoutingBegin => 0,
            Self::Wall | Self::Point => 2,
            Self::CircleCut => 3,
            Self::Curve | Self::NailRow | Self::Drill => 4,
            Self::ModuleBegin
            | Self::VerticalMember
            | Self::HorizontalMember
            | Self::TopPlate
            | Self::BottomPlate => 5,
            Self::SheathingOuter | Self::SheathingInner => 6,
        }
    }

    /// Kind, orientation and plate role for framing member commands
    pub fn member(&self) -> Option<(MemberKind, Orientation, Option<PlateRole>)> {
        match self {
            Self::VerticalMember => Some((MemberKind::Stud, Orientation::Vertical, None)),
            Self::HorizontalMember => Some((MemberKind::Blocking, Orientation::Horizontal, None)),
            Self::TopPlate => Some((
                MemberKind::Plate,
                Orientation::Horizontal,
                Some(PlateRole::Top),
            )),
            Self::BottomPlate => Some((
                MemberKind::Plate,
                Orientation::Horizontal,
                Some(PlateRole::Bottom),
            )),
            _ => None,
        }
    }

    pub fn layer(&self) -> Option<Layer> {
        match self {
            Self::SheathingOuter => Some(Layer::Outer),
            Self::SheathingInner => Some(Layer::Inner),
            _ => None,
        }
    }

    /// Commands that extend an open path instead of interrupting it
    pub fn is_path_vertex(&self) -> bool {
        matches!(self, Self::Point | Self::Curve)
    }

    /// Commands that leave an open sheathing panel active
    pub fn keeps_panel(&self) -> bool {
        matches!(self, Self::Point | Self::RoutingBegin)
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}
