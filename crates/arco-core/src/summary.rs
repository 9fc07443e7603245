//! Structural shape of a model, tracked across incremental updates.

use crate::bimap::IdNameBiMap;
use crate::error::{ArcoError, ResultExt};
use crate::validators::constraints::ValidateConstraint;
use arco_model::{Model, ModelUpdate, ObjectiveData};
use std::collections::BTreeMap;

/// Constraint kinds stored as maps from id to constraint data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Quadratic,
    SecondOrderCone,
    Sos1,
    Sos2,
    Indicator,
}

impl ConstraintKind {
    /// Model field name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ConstraintKind::Quadratic => "quadratic_constraints",
            ConstraintKind::SecondOrderCone => "second_order_cone_constraints",
            ConstraintKind::Sos1 => "sos1_constraints",
            ConstraintKind::Sos2 => "sos2_constraints",
            ConstraintKind::Indicator => "indicator_constraints",
        }
    }
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ids and names of every entity of a model, without the numeric data.
///
/// A summary is created once from a whole model and then mutated once per
/// accepted update. If [`ModelSummary::update`] fails, the summary may hold a
/// partially applied update and must be discarded along with its session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSummary {
    pub variables: IdNameBiMap,
    pub auxiliary_objectives: IdNameBiMap,
    pub linear_constraints: IdNameBiMap,
    pub quadratic_constraints: IdNameBiMap,
    pub second_order_cone_constraints: IdNameBiMap,
    pub sos1_constraints: IdNameBiMap,
    pub sos2_constraints: IdNameBiMap,
    pub indicator_constraints: IdNameBiMap,
    pub maximize: bool,
    pub primary_objective_name: String,
}

impl ModelSummary {
    /// An empty summary of a minimization model.
    pub fn new(check_names: bool) -> Self {
        Self {
            variables: IdNameBiMap::new(check_names),
            auxiliary_objectives: IdNameBiMap::new(check_names),
            linear_constraints: IdNameBiMap::new(check_names),
            quadratic_constraints: IdNameBiMap::new(check_names),
            second_order_cone_constraints: IdNameBiMap::new(check_names),
            sos1_constraints: IdNameBiMap::new(check_names),
            sos2_constraints: IdNameBiMap::new(check_names),
            indicator_constraints: IdNameBiMap::new(check_names),
            maximize: false,
            primary_objective_name: String::new(),
        }
    }

    /// Build the summary of `model`, checking id ordering and name uniqueness.
    pub fn create(model: &Model, check_names: bool) -> Result<Self, ArcoError> {
        let mut summary = Self::new(check_names);
        summary
            .variables
            .bulk_update(&[], &model.variables.ids, &model.variables.names)
            .context("invalid variables")?;
        summary.maximize = model.objective.maximize;
        summary.primary_objective_name = model.objective.name.clone();
        update_objectives(&mut summary.auxiliary_objectives, &[], &model.auxiliary_objectives)
            .context("invalid auxiliary_objectives")?;
        summary
            .linear_constraints
            .bulk_update(
                &[],
                &model.linear_constraints.ids,
                &model.linear_constraints.names,
            )
            .context("invalid linear_constraints")?;
        update_mapped(
            &mut summary.quadratic_constraints,
            &[],
            &model.quadratic_constraints,
        )
        .context("invalid quadratic_constraints")?;
        update_mapped(
            &mut summary.second_order_cone_constraints,
            &[],
            &model.second_order_cone_constraints,
        )
        .context("invalid second_order_cone_constraints")?;
        update_mapped(&mut summary.sos1_constraints, &[], &model.sos1_constraints)
            .context("invalid sos1_constraints")?;
        update_mapped(&mut summary.sos2_constraints, &[], &model.sos2_constraints)
            .context("invalid sos2_constraints")?;
        update_mapped(
            &mut summary.indicator_constraints,
            &[],
            &model.indicator_constraints,
        )
        .context("invalid indicator_constraints")?;
        summary.check_primary_objective_name()?;

        tracing::debug!(
            component = "model_summary",
            operation = "create",
            status = "success",
            variables = summary.variables.size(),
            linear_constraints = summary.linear_constraints.size(),
            auxiliary_objectives = summary.auxiliary_objectives.size(),
            maximize = summary.maximize,
            "Built model summary"
        );
        Ok(summary)
    }

    /// Apply the deletions and additions of `update`.
    ///
    /// Kinds are processed in a fixed order; an error stops processing but
    /// leaves the kinds already handled updated.
    pub fn update(&mut self, update: &ModelUpdate) -> Result<(), ArcoError> {
        self.variables
            .bulk_update(
                &update.deleted_variable_ids,
                &update.new_variables.ids,
                &update.new_variables.names,
            )
            .context("invalid variables")?;
        if let Some(maximize) = update.objective_updates.direction_update {
            self.maximize = maximize;
        }
        let aux = &update.auxiliary_objectives_updates;
        update_objectives(
            &mut self.auxiliary_objectives,
            &aux.deleted_objective_ids,
            &aux.new_objectives,
        )
        .context("invalid auxiliary_objectives")?;
        self.linear_constraints
            .bulk_update(
                &update.deleted_linear_constraint_ids,
                &update.new_linear_constraints.ids,
                &update.new_linear_constraints.names,
            )
            .context("invalid linear_constraints")?;
        update_mapped(
            &mut self.quadratic_constraints,
            &update.quadratic_constraint_updates.deleted_constraint_ids,
            &update.quadratic_constraint_updates.new_constraints,
        )
        .context("invalid quadratic_constraints")?;
        update_mapped(
            &mut self.second_order_cone_constraints,
            &update
                .second_order_cone_constraint_updates
                .deleted_constraint_ids,
            &update.second_order_cone_constraint_updates.new_constraints,
        )
        .context("invalid second_order_cone_constraints")?;
        update_mapped(
            &mut self.sos1_constraints,
            &update.sos1_constraint_updates.deleted_constraint_ids,
            &update.sos1_constraint_updates.new_constraints,
        )
        .context("invalid sos1_constraints")?;
        update_mapped(
            &mut self.sos2_constraints,
            &update.sos2_constraint_updates.deleted_constraint_ids,
            &update.sos2_constraint_updates.new_constraints,
        )
        .context("invalid sos2_constraints")?;
        update_mapped(
            &mut self.indicator_constraints,
            &update.indicator_constraint_updates.deleted_constraint_ids,
            &update.indicator_constraint_updates.new_constraints,
        )
        .context("invalid indicator_constraints")?;
        self.check_primary_objective_name()
    }

    /// Ids of a mapped constraint kind.
    pub fn constraints(&self, kind: ConstraintKind) -> &IdNameBiMap {
        match kind {
            ConstraintKind::Quadratic => &self.quadratic_constraints,
            ConstraintKind::SecondOrderCone => &self.second_order_cone_constraints,
            ConstraintKind::Sos1 => &self.sos1_constraints,
            ConstraintKind::Sos2 => &self.sos2_constraints,
            ConstraintKind::Indicator => &self.indicator_constraints,
        }
    }

    fn check_primary_objective_name(&self) -> Result<(), ArcoError> {
        if self.auxiliary_objectives.has_name(&self.primary_objective_name) {
            return Err(ArcoError::invalid_argument(format!(
                "duplicate objective name: {}",
                self.primary_objective_name
            )));
        }
        Ok(())
    }
}

fn update_objectives(
    map: &mut IdNameBiMap,
    deleted_ids: &[i64],
    new_objectives: &BTreeMap<i64, ObjectiveData>,
) -> Result<(), ArcoError> {
    let new_ids: Vec<i64> = new_objectives.keys().copied().collect();
    let names: Vec<String> = new_objectives
        .values()
        .map(|objective| objective.name.clone())
        .collect();
    map.bulk_update(deleted_ids, &new_ids, &names)
}

fn update_mapped<C: ValidateConstraint>(
    map: &mut IdNameBiMap,
    deleted_ids: &[i64],
    new_constraints: &BTreeMap<i64, C>,
) -> Result<(), ArcoError> {
    let new_ids: Vec<i64> = new_constraints.keys().copied().collect();
    let names: Vec<String> = new_constraints
        .values()
        .map(|constraint| constraint.name().to_string())
        .collect();
    map.bulk_update(deleted_ids, &new_ids, &names)
}
