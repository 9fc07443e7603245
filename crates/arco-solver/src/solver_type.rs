//! Backend identifiers.

/// The solver backends a registry can hold a factory for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SolverType {
    /// Google's simplex LP solver.
    Glop,
    /// Constraint programming and SAT based MIP solver.
    CpSat,
    /// SCIP through its C interface.
    Gscip,
    Gurobi,
    Glpk,
    Highs,
    /// First-order LP solver.
    Pdlp,
    /// Conic solvers.
    Ecos,
    Scs,
    /// Convex QP solver.
    Osqp,
    Xpress,
}

impl SolverType {
    pub const ALL: [SolverType; 11] = [
        SolverType::Glop,
        SolverType::CpSat,
        SolverType::Gscip,
        SolverType::Gurobi,
        SolverType::Glpk,
        SolverType::Highs,
        SolverType::Pdlp,
        SolverType::Ecos,
        SolverType::Scs,
        SolverType::Osqp,
        SolverType::Xpress,
    ];

    /// Get a human-readable string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            SolverType::Glop => "glop",
            SolverType::CpSat => "cp_sat",
            SolverType::Gscip => "gscip",
            SolverType::Gurobi => "gurobi",
            SolverType::Glpk => "glpk",
            SolverType::Highs => "highs",
            SolverType::Pdlp => "pdlp",
            SolverType::Ecos => "ecos",
            SolverType::Scs => "scs",
            SolverType::Osqp => "osqp",
            SolverType::Xpress => "xpress",
        }
    }
}

impl std::fmt::Display for SolverType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_solver_type_display() {
        assert_eq!(SolverType::CpSat.to_string(), "cp_sat");
        assert_eq!(format!("{}", SolverType::Highs), "highs");
    }

    #[test]
    fn test_solver_type_names_are_unique() {
        let names: HashSet<_> = SolverType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(names.len(), SolverType::ALL.len());
    }
}
