//! Selection Execution Engine
//!
//! Runs planned stages against a host selection:
//! - Every stage reads the selection left by the previous one
//! - Every stage overwrites the selection with its result
//! - Objects missing a needed attribute are skipped, never matched
//!
//! Stages compose by overwriting, not by intersecting. A threshold stage
//! followed by a date stage ends with whatever the date stage selected from
//! its own input.

use crate::planner::{Stage, plan_stages};
use crate::predicate::{Comparison, DateField, Extremum, Predicate, Side};
use cityquery_core::{Axis, ObjectId, Result, SelectionContext, Year};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Execution statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionStats {
    pub stages_applied: u64,
    pub objects_scanned: u64,
    pub objects_skipped: u64,
    pub objects_selected: u64,
}

/// Final selection after all stages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionOutcome {
    pub selected: Vec<ObjectId>,
    pub stats: SelectionStats,
}

/// Selection executor
#[derive(Debug, Clone)]
pub struct SelectionExecutor {
    lateral_axis: Axis,
}

impl Default for SelectionExecutor {
    fn default() -> Self {
        Self::new(Axis::Y)
    }
}

impl SelectionExecutor {
    /// Create a new executor comparing positions along `lateral_axis`
    pub fn new(lateral_axis: Axis) -> Self {
        Self { lateral_axis }
    }

    /// Apply predicates to the current selection of `ctx`
    pub fn apply<C>(&self, predicates: &[Predicate], ctx: &mut C) -> Result<SelectionOutcome>
    where
        C: SelectionContext + ?Sized,
    {
        let mut stats = SelectionStats::default();

        for stage in plan_stages(predicates) {
            let before = ctx.selected_objects().len();
            self.execute_stage(&stage, ctx, &mut stats)?;
            stats.stages_applied += 1;
            debug!(
                "Applied {} stage: {} -> {} selected",
                stage.name(),
                before,
                ctx.selected_objects().len()
            );
        }

        let selected = ctx.selected_objects();
        stats.objects_selected = selected.len() as u64;
        Ok(SelectionOutcome { selected, stats })
    }

    fn execute_stage<C>(
        &self,
        stage: &Stage,
        ctx: &mut C,
        stats: &mut SelectionStats,
    ) -> Result<()>
    where
        C: SelectionContext + ?Sized,
    {
        match stage {
            Stage::Extremum(direction) => {
                self.execute_extremum(*direction, ctx, stats);
                Ok(())
            }
            Stage::Threshold { op, value } => {
                self.execute_threshold(*op, *value, ctx, stats);
                Ok(())
            }
            Stage::Date(clauses) => {
                self.execute_date(clauses, ctx, stats);
                Ok(())
            }
            Stage::Position(sides) => self.execute_position(sides, ctx, stats),
        }
    }

    /// Keep the single tallest/lowest object. The first object reaching the
    /// best height wins ties. Without any height-carrying candidate the
    /// selection is left untouched.
    fn execute_extremum<C>(&self, direction: Extremum, ctx: &mut C, stats: &mut SelectionStats)
    where
        C: SelectionContext + ?Sized,
    {
        let mut best: Option<(ObjectId, f64)> = None;

        for id in ctx.selected_objects() {
            stats.objects_scanned += 1;
            let Some(height) = ctx.attributes(id).and_then(|a| a.height) else {
                stats.objects_skipped += 1;
                trace!("Object {} has no height, skipped", id);
                continue;
            };
            if best.is_none_or(|(_, b)| direction.beats(height, b)) {
                best = Some((id, height));
            }
        }

        match best {
            Some((id, height)) => {
                debug!("Extremum {:?} is object {} at height {}", direction, id, height);
                ctx.select_only(&[id]);
            }
            None => debug!("No candidate carries a height, selection unchanged"),
        }
    }

    fn execute_threshold<C>(
        &self,
        op: Comparison,
        value: f64,
        ctx: &mut C,
        stats: &mut SelectionStats,
    ) where
        C: SelectionContext + ?Sized,
    {
        let mut matches = Vec::new();

        for id in ctx.selected_objects() {
            stats.objects_scanned += 1;
            match ctx.attributes(id).and_then(|a| a.height) {
                Some(height) if op.holds(height, value) => matches.push(id),
                Some(_) => {}
                None => {
                    stats.objects_skipped += 1;
                    trace!("Object {} has no height, skipped", id);
                }
            }
        }

        ctx.select_only(&matches);
    }

    /// Deselect everything, then reselect each candidate matching any clause
    fn execute_date<C>(
        &self,
        clauses: &[(DateField, Comparison, Year)],
        ctx: &mut C,
        stats: &mut SelectionStats,
    ) where
        C: SelectionContext + ?Sized,
    {
        let candidates = ctx.selected_objects();
        ctx.deselect_all();

        for id in candidates {
            stats.objects_scanned += 1;
            let Some(attrs) = ctx.attributes(id) else {
                stats.objects_skipped += 1;
                continue;
            };

            let mut any_present = false;
            let mut matched = false;
            for &(field, op, year) in clauses {
                if let Some(value) = field.get(&attrs) {
                    any_present = true;
                    matched |= op.holds(value, year);
                }
            }

            if !any_present {
                stats.objects_skipped += 1;
                trace!("Object {} has no matching date attribute, skipped", id);
            }
            if matched {
                ctx.set_selected(id, true);
            }
        }
    }

    /// Deselect everything, then reselect each candidate whose vertices all
    /// lie strictly on one requested side of the camera
    fn execute_position<C>(
        &self,
        sides: &[Side],
        ctx: &mut C,
        stats: &mut SelectionStats,
    ) -> Result<()>
    where
        C: SelectionContext + ?Sized,
    {
        let camera = self.lateral_axis.component(ctx.camera_location()?);
        let candidates = ctx.selected_objects();
        ctx.deselect_all();

        for id in candidates {
            stats.objects_scanned += 1;
            let vertices = match ctx.world_vertices(id) {
                Some(v) if !v.is_empty() => v,
                _ => {
                    stats.objects_skipped += 1;
                    trace!("Object {} has no vertices, skipped", id);
                    continue;
                }
            };

            let qualifies = sides.iter().any(|side| {
                vertices
                    .iter()
                    .all(|v| side.contains(self.lateral_axis.component(*v), camera))
            });
            if qualifies {
                ctx.set_selected(id, true);
            }
        }

        Ok(())
    }
}
