//! The structured wall model produced by the parser.
//!
//! The model owns the statement list it was built from. Entities refer back
//! into that list by index, which is what lets the editor rewrite or remove
//! exactly the lines behind an entity.

pub mod operations;
pub mod sheathing;
pub mod structure;

pub use operations::{
    CircleCut, CutAttributes, DrillDirection, DrillOperation, DrillTarget, PafRouting, PathCut,
    RoutingSegment,
};
pub use sheathing::{Layer, NailRow, SheathingPanel};
pub use structure::{MemberKind, Module, Orientation, PlateRole, StructuralRect, Wall};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wupkit_core::Bounds2D;

use crate::wup::serializer;

/// Stable identifier handed to the editor
pub type EditorId = u64;

/// Location of a mutable entity inside a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityRef {
    NailRow(usize),
    Drilling(usize),
    Routing(usize),
}

/// Why a statement did not produce an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UnhandledReason {
    UnknownCommand,
    TooFewParameters { expected: usize, found: usize },
    InvalidContext,
    DuplicateWall,
    EmptyRouting,
}

/// A statement kept as a non-fatal diagnostic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnhandledStatement {
    pub statement_index: usize,
    pub command: String,
    pub numbers: Vec<f64>,
    pub body: String,
    pub reason: UnhandledReason,
}

/// Entity counts for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub statements: usize,
    pub modules: usize,
    pub studs: usize,
    pub blockings: usize,
    pub plates: usize,
    pub panels: usize,
    pub nail_rows: usize,
    pub routings: usize,
    pub routing_segments: usize,
    pub drillings: usize,
    pub unhandled: usize,
}

/// Complete result of parsing one WUP document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallModel {
    pub wall: Option<Wall>,
    pub modules: Vec<Module>,
    pub structural: Vec<StructuralRect>,
    pub panels: Vec<SheathingPanel>,
    pub nail_rows: Vec<NailRow>,
    pub routings: Vec<PafRouting>,
    pub drillings: Vec<DrillOperation>,
    pub bounds: Bounds2D,
    pub unhandled: Vec<UnhandledStatement>,
    /// Source statements without terminators. `None` marks a deleted statement.
    pub statements: Vec<Option<String>>,
    /// Text the model was first loaded from
    pub source: String,
    pub terminator: char,
    /// Next editor id to hand out. Never decreases.
    pub next_id: EditorId,
}

impl WallModel {
    pub(crate) fn empty(statements: Vec<Option<String>>, source: String, terminator: char) -> Self {
        Self {
            wall: None,
            modules: Vec::new(),
            structural: Vec::new(),
            panels: Vec::new(),
            nail_rows: Vec::new(),
            routings: Vec::new(),
            drillings: Vec::new(),
            bounds: Bounds2D::new(),
            unhandled: Vec::new(),
            statements,
            source,
            terminator,
            next_id: 1,
        }
    }

    fn editor_id_slot(&mut self, entity: EntityRef) -> Option<&mut Option<EditorId>> {
        match entity {
            EntityRef::NailRow(i) => self.nail_rows.get_mut(i).map(|e| &mut e.editor_id),
            EntityRef::Drilling(i) => self.drillings.get_mut(i).map(|e| &mut e.editor_id),
            EntityRef::Routing(i) => self.routings.get_mut(i).map(|e| &mut e.editor_id),
        }
    }

    /// Editor id of an entity, assigning the next one on first touch
    pub fn ensure_editor_id(&mut self, entity: EntityRef) -> Option<EditorId> {
        let next = self.next_id;
        let slot = self.editor_id_slot(entity)?;
        if let Some(id) = *slot {
            return Some(id);
        }
        *slot = Some(next);
        self.next_id = next + 1;
        Some(next)
    }

    /// Touch every mutable entity so each one carries an id
    pub fn assign_editor_ids(&mut self) {
        for i in 0..self.nail_rows.len() {
            self.ensure_editor_id(EntityRef::NailRow(i));
        }
        for i in 0..self.drillings.len() {
            self.ensure_editor_id(EntityRef::Drilling(i));
        }
        for i in 0..self.routings.len() {
            self.ensure_editor_id(EntityRef::Routing(i));
        }
    }

    pub fn editor_id(&self, entity: EntityRef) -> Option<EditorId> {
        match entity {
            EntityRef::NailRow(i) => self.nail_rows.get(i)?.editor_id,
            EntityRef::Drilling(i) => self.drillings.get(i)?.editor_id,
            EntityRef::Routing(i) => self.routings.get(i)?.editor_id,
        }
    }

    /// Locate an entity by its editor id
    pub fn find_entity(&self, id: EditorId) -> Option<EntityRef> {
        if let Some(i) = self.nail_rows.iter().position(|e| e.editor_id == Some(id)) {
            return Some(EntityRef::NailRow(i));
        }
        if let Some(i) = self.drillings.iter().position(|e| e.editor_id == Some(id)) {
            return Some(EntityRef::Drilling(i));
        }
        self.routings
            .iter()
            .position(|e| e.editor_id == Some(id))
            .map(EntityRef::Routing)
    }

    /// Statement indices that together define an entity
    pub fn statement_indices(&self, entity: EntityRef) -> Option<Vec<usize>> {
        match entity {
            EntityRef::NailRow(i) => Some(vec![self.nail_rows.get(i)?.statement_index]),
            EntityRef::Drilling(i) => Some(vec![self.drillings.get(i)?.statement_index]),
            EntityRef::Routing(i) => Some(self.routings.get(i)?.statement_indices.clone()),
        }
    }

    /// Remove an entity from its collection
    pub fn remove_entity(&mut self, entity: EntityRef) -> bool {
        match entity {
            EntityRef::NailRow(i) if i < self.nail_rows.len() => {
                self.nail_rows.remove(i);
            }
            EntityRef::Drilling(i) if i < self.drillings.len() => {
                self.drillings.remove(i);
            }
            EntityRef::Routing(i) if i < self.routings.len() => {
                self.routings.remove(i);
            }
            _ => return false,
        }
        true
    }

    /// Copy editor ids from `previous` onto entities anchored at the same
    /// first statement index, and keep the id counter from going backwards.
    pub fn carry_identity_from(&mut self, previous: &WallModel) {
        let rows: HashMap<usize, EditorId> = previous
            .nail_rows
            .iter()
            .filter_map(|e| Some((e.statement_index, e.editor_id?)))
            .collect();
        let drills: HashMap<usize, EditorId> = previous
            .drillings
            .iter()
            .filter_map(|e| Some((e.statement_index, e.editor_id?)))
            .collect();
        let routings: HashMap<usize, EditorId> = previous
            .routings
            .iter()
            .filter_map(|e| Some((e.header_index()?, e.editor_id?)))
            .collect();

        for row in &mut self.nail_rows {
            row.editor_id = rows.get(&row.statement_index).copied();
        }
        for drill in &mut self.drillings {
            drill.editor_id = drills.get(&drill.statement_index).copied();
        }
        for routing in &mut self.routings {
            routing.editor_id = routing
                .header_index()
                .and_then(|index| routings.get(&index).copied());
        }

        self.next_id = self.next_id.max(previous.next_id);
    }

    /// Rebuild the bounds from the entities currently in the model
    pub fn recompute_bounds(&mut self) {
        let mut bounds = Bounds2D::new();
        if let Some(wall) = &self.wall {
            bounds.include_rect(0.0, 0.0, wall.width, wall.height);
        }
        for module in &self.modules {
            bounds.include_rect(module.origin.x, module.origin.y, module.width, module.height);
        }
        for rect in &self.structural {
            bounds.update(rect.x, rect.y);
            bounds.update(rect.right(), rect.top());
        }
        for panel in &self.panels {
            bounds.include_rect(panel.origin.x, panel.origin.y, panel.width, panel.height);
            bounds.include_points(&panel.points);
        }
        for row in &self.nail_rows {
            bounds.include_point(&row.start);
            bounds.include_point(&row.end);
        }
        for drill in &self.drillings {
            drill.extend_bounds(&mut bounds);
        }
        for segment in self.routings.iter().flat_map(|r| &r.segments) {
            segment.extend_bounds(&mut bounds);
        }
        self.bounds = bounds;
    }

    /// Statement texts that are still present
    pub fn live_statements(&self) -> impl Iterator<Item = &str> {
        self.statements
            .iter()
            .filter_map(|s| s.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    /// Re-serialize the statement list
    pub fn to_wup(&self) -> String {
        serializer::serialize(&self.statements, &self.source, self.terminator)
    }

    pub fn summary(&self) -> ModelSummary {
        let count = |kind: MemberKind| self.structural.iter().filter(|r| r.kind == kind).count();
        ModelSummary {
            statements: self.live_statements().count(),
            modules: self.modules.len(),
            studs: count(MemberKind::Stud),
            blockings: count(MemberKind::Blocking),
            plates: count(MemberKind::Plate),
            panels: self.panels.len(),
            nail_rows: self.nail_rows.len(),
            routings: self.routings.len(),
            routing_segments: self.routings.iter().map(|r| r.segments.len()).sum(),
            drillings: self.drillings.len(),
            unhandled: self.unhandled.len(),
        }
    }
}
