//! Translate and delete entities by editor id.

use tracing::{debug, warn};
use wupkit_parser::wup::parse_number;
use wupkit_parser::{EditorId, EntityRef, Statement, WallModel, WupParser};

use crate::error::{EditorError, EditorResult};
use crate::handle::ModelHandle;
use crate::options::{format_number, EditStrategy, EditorOptions};

/// Editor over a parsed wall model
#[derive(Debug, Clone)]
pub struct WallEditor {
    parser: WupParser,
    options: EditorOptions,
    handle: ModelHandle,
}

impl WallEditor {
    pub fn new(model: WallModel, parser: WupParser, options: EditorOptions) -> Self {
        Self {
            parser,
            options,
            handle: ModelHandle::new(model),
        }
    }

    /// Parse `text` and open an editor on the result
    pub fn from_text(text: &str, parser: WupParser, options: EditorOptions) -> EditorResult<Self> {
        let model = parser.parse(text)?;
        Ok(Self::new(model, parser, options))
    }

    pub fn model(&self) -> &WallModel {
        self.handle.model()
    }

    pub fn handle(&self) -> &ModelHandle {
        &self.handle
    }

    pub fn generation(&self) -> u64 {
        self.handle.generation()
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn set_strategy(&mut self, strategy: EditStrategy) {
        self.options.strategy = strategy;
    }

    /// Serialize the current statement list
    pub fn to_wup(&self) -> String {
        self.model().to_wup()
    }

    /// Give every mutable entity an editor id
    pub fn assign_editor_ids(&mut self) {
        let mut next = self.model().clone();
        next.assign_editor_ids();
        if next != *self.model() {
            self.handle.swap(next);
        }
    }

    /// Entity currently carrying `id`
    pub fn locate(&self, id: EditorId) -> EditorResult<EntityRef> {
        self.model()
            .find_entity(id)
            .ok_or(EditorError::EntityNotFound(id))
    }

    /// Move an entity.
    ///
    /// Drillings only move along x; `dy` is ignored for them.
    pub fn translate(&mut self, id: EditorId, dx: f64, dy: f64) -> EditorResult<()> {
        let result = self.build_translated(id, dx, dy);
        self.commit("translate", id, result)
    }

    /// Remove an entity together with its statements
    pub fn delete(&mut self, id: EditorId) -> EditorResult<()> {
        let result = self.build_deleted(id);
        self.commit("delete", id, result)
    }

    /// Replace one statement's text and re-parse the document
    pub fn replace_statement(&mut self, index: usize, text: &str) -> EditorResult<()> {
        let result = self.build_replaced(index, text);
        match result {
            Ok(model) => {
                let generation = self.handle.swap(model);
                debug!("Statement {} replaced (generation {})", index, generation);
                Ok(())
            }
            Err(err) => {
                warn!("Replacing statement {} declined: {}", index, err);
                Err(err)
            }
        }
    }

    /// Re-parse the current statement list from scratch
    pub fn reparse(&mut self) -> EditorResult<()> {
        match self.parser.reparse(self.model()) {
            Ok(model) => {
                self.handle.swap(model);
                Ok(())
            }
            Err(err) => {
                warn!("Re-parse declined: {}", err);
                Err(err.into())
            }
        }
    }

    fn commit(
        &mut self,
        action: &str,
        id: EditorId,
        result: EditorResult<WallModel>,
    ) -> EditorResult<()> {
        match result {
            Ok(model) => {
                let generation = self.handle.swap(model);
                debug!(
                    "{} of entity {} applied (generation {})",
                    action, id, generation
                );
                Ok(())
            }
            Err(err) => {
                warn!("{} of entity {} declined: {}", action, id, err);
                Err(err)
            }
        }
    }

    /// Bring a rewritten model up to date according to the strategy
    fn finish(&self, mut model: WallModel) -> EditorResult<WallModel> {
        match self.options.strategy {
            EditStrategy::Patch => {
                model.recompute_bounds();
                Ok(model)
            }
            EditStrategy::Reparse => Ok(self.parser.reparse(&model)?),
        }
    }

    fn build_translated(&self, id: EditorId, dx: f64, dy: f64) -> EditorResult<WallModel> {
        let entity = self.locate(id)?;
        let mut next = self.model().clone();
        let precision = self.options.precision;

        match entity {
            EntityRef::NailRow(i) => {
                let index = next.nail_rows[i].statement_index;
                let shifts = [(0, dx), (1, dy), (2, dx), (3, dy)];
                shift_tokens(&mut next, index, &shifts, precision)?;
                next.nail_rows[i].translate(dx, dy);
            }
            EntityRef::Drilling(i) => {
                let index = next.drillings[i].statement_index;
                shift_tokens(&mut next, index, &[(0, dx)], precision)?;
                next.drillings[i].translate_x(dx);
            }
            EntityRef::Routing(i) => {
                let indices: Vec<usize> = next.routings[i]
                    .statement_indices
                    .iter()
                    .skip(1)
                    .copied()
                    .collect();
                for index in indices {
                    shift_tokens(&mut next, index, &[(0, dx), (1, dy)], precision)?;
                }
                next.routings[i].translate(dx, dy);
            }
        }

        self.finish(next)
    }

    fn build_deleted(&self, id: EditorId) -> EditorResult<WallModel> {
        let entity = self.locate(id)?;
        let mut next = self.model().clone();
        let indices = next
            .statement_indices(entity)
            .ok_or(EditorError::EntityNotFound(id))?;

        for index in indices {
            let len = next.statements.len();
            let slot = next
                .statements
                .get_mut(index)
                .ok_or(EditorError::StatementOutOfRange { index, len })?;
            if slot.take().is_none() {
                return Err(EditorError::StatementMissing(index));
            }
        }
        next.remove_entity(entity);

        self.finish(next)
    }

    fn build_replaced(&self, index: usize, text: &str) -> EditorResult<WallModel> {
        let mut next = self.model().clone();
        let len = next.statements.len();
        let slot = next
            .statements
            .get_mut(index)
            .ok_or(EditorError::StatementOutOfRange { index, len })?;
        let text = text.trim().trim_end_matches(next.terminator).trim_end();
        *slot = if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        };
        Ok(self.parser.reparse(&next)?)
    }
}

/// Add deltas to numeric tokens of one statement, keeping its layout
fn shift_tokens(
    model: &mut WallModel,
    index: usize,
    shifts: &[(usize, f64)],
    precision: usize,
) -> EditorResult<()> {
    let len = model.statements.len();
    let text = model
        .statements
        .get(index)
        .ok_or(EditorError::StatementOutOfRange { index, len })?
        .as_deref()
        .ok_or(EditorError::StatementMissing(index))?;

    let statement = Statement::parse(text);
    let tokens = statement.tokens();
    let mut replacements = Vec::with_capacity(shifts.len());
    for (token, delta) in shifts {
        let value = tokens
            .get(*token)
            .and_then(|t| parse_number(t))
            .ok_or_else(|| EditorError::MalformedStatement {
                index,
                reason: format!("token {} is not a number", token),
            })?;
        replacements.push((*token, format_number(value + delta, precision)));
    }

    let rewritten = statement
        .rewrite_tokens(&replacements)
        .ok_or_else(|| EditorError::MalformedStatement {
            index,
            reason: "token layout changed".to_string(),
        })?;
    model.statements[index] = Some(rewritten);
    Ok(())
}
