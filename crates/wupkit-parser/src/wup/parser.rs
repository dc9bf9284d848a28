//! Model builder: one forward pass over the statement list.

use tracing::{debug, trace};
use wupkit_core::Point2D;

use super::command::CommandKind;
use super::resolve::{resolve_drill, resolve_offset, resolve_xy};
use super::state::{ActiveContext, ParserState, PathAccumulator, RoutingInProgress};
use super::statement::{is_numeric_token, parse_number, split_statements, Statement};
use crate::error::{ParseError, ParseResult};
use crate::geometry::{ArcFlag, ArcSolver, PathAssembler, PathCommand};
use crate::model::{
    CircleCut, DrillDirection, DrillOperation, DrillTarget, Module, NailRow, PafRouting,
    PathCut, RoutingSegment, SheathingPanel, StructuralRect, UnhandledReason,
    UnhandledStatement, Wall, WallModel,
};
use crate::options::ParserOptions;

/// WUP parser
///
/// Stateless between calls. Each parse owns a fresh [`ParserState`].
#[derive(Debug, Clone)]
pub struct WupParser {
    options: ParserOptions,
    solver: ArcSolver,
}

impl Default for WupParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl WupParser {
    pub fn new(options: ParserOptions) -> Self {
        let solver = ArcSolver::new(&options);
        Self { options, solver }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse a WUP document
    pub fn parse(&self, text: &str) -> ParseResult<WallModel> {
        if text.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }
        debug!("Starting WUP parse, input size: {} bytes", text.len());
        let statements = split_statements(text, self.options.terminator)
            .into_iter()
            .map(Some)
            .collect();
        self.parse_statements(statements, text)
    }

    /// Parse an already split statement list. `None` entries are skipped
    /// but keep their index.
    pub fn parse_statements(
        &self,
        statements: Vec<Option<String>>,
        source: &str,
    ) -> ParseResult<WallModel> {
        let builder = ModelBuilder {
            parser: self,
            state: ParserState::new(),
            model: WallModel::empty(statements, source.to_string(), self.options.terminator),
        };
        builder.run()
    }

    /// Parse the (edited) statement list of `previous` from scratch.
    ///
    /// Editor ids carry over to entities anchored at the same statement.
    pub fn reparse(&self, previous: &WallModel) -> ParseResult<WallModel> {
        let mut model = self.parse_statements(previous.statements.clone(), &previous.source)?;
        model.carry_identity_from(previous);
        Ok(model)
    }
}

/// Parse with default options
pub fn parse_wup(text: &str) -> ParseResult<WallModel> {
    WupParser::default().parse(text)
}

fn opt(numbers: &[f64], index: usize) -> Option<f64> {
    numbers.get(index).copied()
}

struct ModelBuilder<'p> {
    parser: &'p WupParser,
    state: ParserState,
    model: WallModel,
}

impl<'p> ModelBuilder<'p> {
    fn run(mut self) -> ParseResult<WallModel> {
        let statements = self.model.statements.clone();
        let mut live = 0;
        for (index, slot) in statements.iter().enumerate() {
            let Some(text) = slot.as_deref().filter(|s| !s.trim().is_empty()) else {
                continue;
            };
            live += 1;
            self.process(index, text);
        }
        self.finalize_routing();

        if live == 0 {
            return Err(ParseError::EmptyInput);
        }
        if !self.model.bounds.is_valid() {
            return Err(ParseError::NoGeometry { statements: live });
        }

        let summary = self.model.summary();
        debug!(
            "WUP parse complete: {} statements, {} members, {} panels, {} nail rows, {} routings, {} drillings, {} unhandled",
            live,
            self.model.structural.len(),
            summary.panels,
            summary.nail_rows,
            summary.routings,
            summary.drillings,
            summary.unhandled
        );
        Ok(self.model)
    }

    fn active_module(&self) -> Option<&Module> {
        self.state
            .active_module
            .and_then(|index| self.model.modules.get(index))
    }

    fn unhandled(&mut self, index: usize, statement: &Statement<'_>, reason: UnhandledReason) {
        trace!(
            "Statement {} unhandled ({:?}): {}",
            index,
            reason,
            statement.text()
        );
        self.model.unhandled.push(UnhandledStatement {
            statement_index: index,
            command: statement.command().to_string(),
            numbers: statement.numbers(),
            body: statement.body().trim().to_string(),
            reason,
        });
    }

    fn process(&mut self, index: usize, text: &str) {
        let statement = Statement::parse(text);
        let Some(kind) = CommandKind::lookup(statement.command()) else {
            self.finalize_routing();
            self.state.active_panel = None;
            self.unhandled(index, &statement, UnhandledReason::UnknownCommand);
            return;
        };
        trace!("Statement {}: {}", index, kind);

        if !kind.is_path_vertex() {
            self.flush_path();
        }
        if !kind.keeps_panel() {
            self.state.active_panel = None;
        }

        let numbers = statement.numbers();
        let found = match kind {
            CommandKind::Curve => statement
                .tokens()
                .iter()
                .take(kind.min_params())
                .take_while(|t| is_numeric_token(t))
                .count(),
            _ => numbers.len(),
        };
        if found < kind.min_params() {
            let reason = UnhandledReason::TooFewParameters {
                expected: kind.min_params(),
                found,
            };
            self.unhandled(index, &statement, reason);
            return;
        }

        match kind {
            CommandKind::Wall => self.wall(index, &statement, &numbers),
            CommandKind::ModuleBegin => self.module_begin(index, &numbers),
            CommandKind::ModuleEnd => self.state.end_module(),
            CommandKind::VerticalMember
            | CommandKind::HorizontalMember
            | CommandKind::TopPlate
            | CommandKind::BottomPlate => self.member(index, kind, &numbers),
            CommandKind::RoutingBegin => self.routing_begin(index, &statement, numbers),
            CommandKind::CircleCut => self.circle_cut(index, &statement, &numbers),
            CommandKind::SheathingOuter | CommandKind::SheathingInner => {
                self.sheathing(index, kind, &statement, &numbers)
            }
            CommandKind::Point => self.point(index, &statement, &numbers),
            CommandKind::Curve => self.curve(index, &statement),
            CommandKind::NailRow => self.nail_row(index, &numbers),
            CommandKind::Drill => self.drill(index, &numbers),
        }
    }

    fn wall(&mut self, index: usize, statement: &Statement<'_>, n: &[f64]) {
        if self.model.wall.is_some() {
            self.unhandled(index, statement, UnhandledReason::DuplicateWall);
            return;
        }
        let wall = Wall {
            width: n[0],
            height: n[1],
            thickness: opt(n, 2).unwrap_or(0.0),
            side: match opt(n, 3) {
                Some(side) if side < 0.0 => -1,
                _ => 1,
            },
            statement_index: index,
        };
        self.model.bounds.include_rect(0.0, 0.0, wall.width, wall.height);
        self.model.wall = Some(wall);
    }

    fn module_begin(&mut self, index: usize, n: &[f64]) {
        if self.state.active_module.is_some() {
            debug!(
                "Module at statement {} starts before the previous one ended",
                index
            );
            self.state.end_module();
        }
        let module = Module {
            width: n[0],
            height: n[1],
            thickness: n[2],
            origin: wupkit_core::Point3D::new(n[3], n[4], opt(n, 5).unwrap_or(0.0)),
            statement_index: index,
        };
        self.model.bounds.include_rect(
            module.origin.x,
            module.origin.y,
            module.width,
            module.height,
        );
        self.model.modules.push(module);
        self.state.active_module = Some(self.model.modules.len() - 1);
        self.state.last_structural = None;
    }

    fn member(&mut self, index: usize, kind: CommandKind, n: &[f64]) {
        let Some((member, orientation, role)) = kind.member() else {
            return;
        };
        let module = self.active_module();
        let position = resolve_xy(module, n[3], n[4]);
        let offset = resolve_offset(module, opt(n, 5));
        let (width, height) = StructuralRect::dimensions(
            orientation,
            n[0],
            n[1],
            n[2],
            self.parser.options.rotation_swap_tolerance_deg,
        );

        let rect = StructuralRect {
            kind: member,
            role,
            x: position.x,
            y: position.y,
            width,
            height,
            orientation,
            rotation: n[2],
            offset,
            module_index: self.state.active_module,
            statement_index: index,
        };
        self.model.bounds.include_rect(rect.x, rect.y, width, height);
        self.model.structural.push(rect);
        self.state.last_structural = Some(self.model.structural.len() - 1);
    }

    fn routing_begin(&mut self, index: usize, statement: &Statement<'_>, n: Vec<f64>) {
        self.finalize_routing();
        self.state.active_routing = Some(RoutingInProgress {
            header_index: index,
            header_command: statement.command().to_string(),
            tool: opt(&n, 0),
            face: opt(&n, 1),
            passes: opt(&n, 2),
            header_numbers: n,
            header_body: statement.body().trim().to_string(),
            segments: Vec::new(),
            statement_indices: vec![index],
            path: None,
        });
    }

    fn circle_cut(&mut self, index: usize, statement: &Statement<'_>, n: &[f64]) {
        if self.state.active_routing.is_none() {
            self.unhandled(index, statement, UnhandledReason::InvalidContext);
            return;
        }
        let Some(routing) = self.state.active_routing.as_mut() else {
            return;
        };
        let segment = RoutingSegment::Circle(CircleCut {
            center: Point2D::new(n[0], n[1]),
            radius: n[2].abs(),
            depth: opt(n, 3),
            orientation: opt(n, 4),
            statement_index: index,
        });
        segment.extend_bounds(&mut self.model.bounds);
        routing.segments.push(segment);
        routing.statement_indices.push(index);
    }

    fn sheathing(&mut self, index: usize, kind: CommandKind, statement: &Statement<'_>, n: &[f64]) {
        let Some(layer) = kind.layer() else {
            return;
        };
        let module = self.active_module();
        let origin = resolve_xy(module, n[3], n[4]);
        let offset = resolve_offset(module, opt(n, 6));

        let panel = SheathingPanel {
            layer,
            width: n[0].abs(),
            height: n[1].abs(),
            thickness: n[2].abs(),
            origin,
            offset,
            rotation: n[5],
            material: statement.first_text_token().map(str::to_string),
            face: layer.face_direction(),
            points: Vec::new(),
            statement_indices: vec![index],
        };
        self.model
            .bounds
            .include_rect(origin.x, origin.y, panel.width, panel.height);
        self.model.panels.push(panel);
        self.state.active_panel = Some(self.model.panels.len() - 1);
        self.state.current_layer = Some(layer);
    }

    fn point(&mut self, index: usize, statement: &Statement<'_>, n: &[f64]) {
        match self.state.point_target() {
            ActiveContext::Panel(panel_index) => {
                let point = resolve_xy(self.active_module(), n[0], n[1]);
                if let Some(panel) = self.model.panels.get_mut(panel_index) {
                    panel.points.push(point);
                    panel.statement_indices.push(index);
                    self.model.bounds.include_point(&point);
                }
            }
            ActiveContext::Routing => {
                let Some(routing) = self.state.active_routing.as_mut() else {
                    return;
                };
                let point = Point2D::new(n[0], n[1]);
                routing.statement_indices.push(index);
                let path = routing.path.get_or_insert_with(PathAccumulator::default);
                let command = if path.has_current_point() {
                    PathCommand::Line(point)
                } else {
                    PathCommand::Move(point)
                };
                path.commands.push(command);
                path.samples
                    .push(opt(n, 2), opt(n, 3), opt(n, 4), opt(n, 5));
                path.statement_indices.push(index);
            }
            ActiveContext::None => {
                self.unhandled(index, statement, UnhandledReason::InvalidContext);
            }
        }
    }

    fn curve(&mut self, index: usize, statement: &Statement<'_>) {
        if self.state.active_routing.is_none() {
            self.unhandled(index, statement, UnhandledReason::InvalidContext);
            return;
        }
        let tokens = statement.tokens();
        let value = |i: usize| tokens.get(i).and_then(|t| parse_number(t));
        let target = Point2D::new(value(0).unwrap_or(0.0), value(1).unwrap_or(0.0));
        let radius = value(2).unwrap_or(0.0);
        let flag = tokens
            .get(4)
            .and_then(|t| ArcFlag::parse(t))
            .unwrap_or_default();

        let Some(routing) = self.state.active_routing.as_mut() else {
            return;
        };
        routing.statement_indices.push(index);
        let path = routing.path.get_or_insert_with(PathAccumulator::default);
        let command = if path.has_current_point() {
            PathCommand::Arc {
                to: target,
                radius,
                flag,
            }
        } else {
            PathCommand::Move(target)
        };
        path.commands.push(command);
        path.samples.push(value(3), value(5), value(6), value(7));
        path.statement_indices.push(index);
    }

    fn nail_row(&mut self, index: usize, n: &[f64]) {
        let row = NailRow {
            editor_id: None,
            start: Point2D::new(n[0], n[1]),
            end: Point2D::new(n[2], n[3]),
            spacing: opt(n, 4),
            gauge: opt(n, 5),
            layer: self.state.current_layer,
            statement_index: index,
        };
        self.model.bounds.include_point(&row.start);
        self.model.bounds.include_point(&row.end);
        self.model.nail_rows.push(row);
    }

    fn drill(&mut self, index: usize, n: &[f64]) {
        let (local_x, local_z, diameter, depth) = (n[0], n[1], n[2], n[3]);
        let target_rect = self
            .state
            .last_structural
            .and_then(|i| self.model.structural.get(i).map(|rect| (i, rect)));
        let position = resolve_drill(
            target_rect.map(|(_, rect)| rect),
            self.active_module(),
            local_x,
            local_z,
            depth,
        );
        let target = target_rect.map(|(element_index, rect)| DrillTarget {
            element_index,
            kind: rect.kind,
            role: rect.role,
        });

        let operation = DrillOperation {
            editor_id: None,
            local_x,
            local_z,
            position,
            diameter: diameter.abs(),
            depth,
            direction: DrillDirection::from_depth(depth),
            target,
            statement_index: index,
        };
        operation.extend_bounds(&mut self.model.bounds);
        self.model.drillings.push(operation);
    }

    /// Assemble the open path of the active routing into a segment
    fn flush_path(&mut self) {
        let Some(routing) = self.state.active_routing.as_mut() else {
            return;
        };
        let Some(path) = routing.path.take() else {
            return;
        };

        let assembler =
            PathAssembler::new(&self.parser.solver, self.parser.options.point_tolerance);
        let assembled = assembler.assemble(&path.commands);
        if assembled.points.len() < 2 {
            debug!(
                "Dropping routing path with {} usable points (statements {:?})",
                assembled.points.len(),
                path.statement_indices
            );
            return;
        }

        self.model.bounds.include_points(&assembled.points);
        let closed = assembled.closed;
        let cut = PathCut {
            points: assembled.points,
            path: assembled.segments,
            force_closed: assembled.force_closed,
            attributes: path.samples.reduce(),
            statement_indices: path.statement_indices,
        };
        routing.segments.push(if closed {
            RoutingSegment::Polygon(cut)
        } else {
            RoutingSegment::Polyline(cut)
        });
    }

    fn finalize_routing(&mut self) {
        self.flush_path();
        let Some(routing) = self.state.active_routing.take() else {
            return;
        };

        if routing.segments.is_empty() {
            debug!(
                "Routing at statement {} has no segments",
                routing.header_index
            );
            self.model.unhandled.push(UnhandledStatement {
                statement_index: routing.header_index,
                command: routing.header_command,
                numbers: routing.header_numbers,
                body: routing.header_body,
                reason: UnhandledReason::EmptyRouting,
            });
            return;
        }

        self.model.routings.push(PafRouting {
            editor_id: None,
            tool: routing.tool,
            face: routing.face,
            passes: routing.passes,
            segments: routing.segments,
            statement_indices: routing.statement_indices,
        });
    }
}
