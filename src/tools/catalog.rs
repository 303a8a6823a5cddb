//! Curated API catalog for SageMath fusion rings
//!
//! Static, read-only reference data used for discovery. Nothing here runs
//! the engine.

pub const PACKAGE_MODULES: &[&str] = &[
    "fusion_ring",
    "fusion_double",
    "f_matrix",
    "fast_parallel_fmats_methods",
    "fast_parallel_fusion_ring_braid_repn",
    "poly_tup_engine",
    "shm_managers",
];

pub const FUSION_RING_METHODS: &[&str] = &[
    "D_minus",
    "D_plus",
    "N_ijk",
    "Nk_ij",
    "conj_matrix",
    "field",
    "fusion_l",
    "fusion_labels",
    "fusion_level",
    "fvars_field",
    "gens_satisfy_braid_gp_rels",
    "get_braid_generators",
    "get_computational_basis",
    "get_fmatrix",
    "get_order",
    "global_q_dimension",
    "is_multiplicity_free",
    "r_matrix",
    "root_of_unity",
    "s_ij",
    "s_ijconj",
    "s_matrix",
    "some_elements",
    "total_q_order",
    "twists_matrix",
    "virasoro_central_charge",
];

pub const FUSION_RING_ELEMENT_METHODS: &[&str] = &[
    "is_simple_object",
    "q_dimension",
    "ribbon",
    "twist",
    "weight",
];

pub const FUSION_DOUBLE_METHODS: &[&str] = &[
    "D_minus",
    "D_plus",
    "N_ijk",
    "Nk_ij",
    "dual",
    "field",
    "fvars_field",
    "get_fmatrix",
    "global_q_dimension",
    "group",
    "inject_variables",
    "is_multiplicity_free",
    "one_basis",
    "product_on_basis",
    "r_matrix",
    "root_of_unity",
    "s_ij",
    "s_ijconj",
    "s_matrix",
    "total_q_order",
];

pub const FMATRIX_METHODS: &[&str] = &[
    "attempt_number_field_computation",
    "certify_pentagons",
    "clear_equations",
    "clear_vars",
    "equations_graph",
    "f_from",
    "f_to",
    "field",
    "find_cyclotomic_solution",
    "find_orthogonal_solution",
    "findcases",
    "fmat",
    "fmatrix",
    "fmats_are_orthogonal",
    "fvars_are_real",
    "get_coerce_map_from_fr_cyclotomic_field",
    "get_defining_equations",
    "get_fvars",
    "get_fvars_by_size",
    "get_fvars_in_alg_field",
    "get_non_cyclotomic_roots",
    "get_orthogonality_constraints",
    "get_poly_ring",
    "get_qqbar_embedding",
    "get_radical_expression",
    "largest_fmat_size",
    "load_fvars",
    "save_fvars",
    "shutdown_worker_pool",
    "start_worker_pool",
];

/// Version-dependent alias note for the braid representation check
pub const BRAID_ALIAS_NOTE: &str = "Note: some Sage versions expose test_braid_representation \
instead of check_braid_representation.";

/// Returned for any scope outside the fixed set
pub const INVALID_SCOPE_MESSAGE: &str =
    "Invalid scope. Use one of: all, fusion_ring, fusion_double, f_matrix.";

/// Catalog filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogScope {
    All,
    FusionRing,
    FusionDouble,
    FMatrix,
}

impl CatalogScope {
    pub const NAMES: [&'static str; 4] = ["all", "fusion_ring", "fusion_double", "f_matrix"];

    /// Parse a caller scope; surrounding whitespace and case are ignored
    pub fn parse(scope: &str) -> Option<Self> {
        match scope.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "fusion_ring" => Some(Self::FusionRing),
            "fusion_double" => Some(Self::FusionDouble),
            "f_matrix" => Some(Self::FMatrix),
            _ => None,
        }
    }

    fn includes(self, section: CatalogScope) -> bool {
        self == CatalogScope::All || self == section
    }
}

fn push_section(parts: &mut Vec<String>, title: &str, methods: &[&str]) {
    parts.push(format!("\n{} methods:", title));
    parts.extend(methods.iter().map(|m| format!("- {}", m)));
}

/// Render the catalog for a scope
pub fn render(scope: CatalogScope) -> String {
    let mut parts = vec!["Package modules:".to_string()];
    parts.extend(PACKAGE_MODULES.iter().map(|m| format!("- {}", m)));

    if scope.includes(CatalogScope::FusionRing) {
        push_section(&mut parts, "FusionRing", FUSION_RING_METHODS);
        push_section(&mut parts, "FusionRing.Element", FUSION_RING_ELEMENT_METHODS);
        parts.push(format!("\n{}", BRAID_ALIAS_NOTE));
    }

    if scope.includes(CatalogScope::FusionDouble) {
        push_section(&mut parts, "FusionDouble", FUSION_DOUBLE_METHODS);
    }

    if scope.includes(CatalogScope::FMatrix) {
        push_section(&mut parts, "FMatrix", FMATRIX_METHODS);
    }

    parts.join("\n")
}

/// Catalog text for a caller-supplied scope; never fails
pub fn catalog(scope: &str) -> String {
    match CatalogScope::parse(scope) {
        Some(scope) => render(scope),
        None => INVALID_SCOPE_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_scope() {
        assert_eq!(catalog("bogus"), INVALID_SCOPE_MESSAGE);
        assert_eq!(catalog(""), INVALID_SCOPE_MESSAGE);
        assert_eq!(catalog("fusion ring"), INVALID_SCOPE_MESSAGE);
    }

    #[test]
    fn test_scope_normalization() {
        assert_eq!(catalog("  F_MATRIX \n"), catalog("f_matrix"));
        assert_eq!(CatalogScope::parse("All"), Some(CatalogScope::All));
    }

    #[test]
    fn test_modules_always_listed() {
        for scope in CatalogScope::NAMES {
            let text = catalog(scope);
            assert!(text.starts_with("Package modules:\n- fusion_ring\n"));
            assert!(text.contains("- shm_managers"));
        }
    }

    #[test]
    fn test_fusion_ring_scope() {
        let text = catalog("fusion_ring");
        assert!(text.contains("\n\nFusionRing methods:\n- D_minus\n"));
        assert!(text.contains("\n\nFusionRing.Element methods:\n- is_simple_object\n"));
        assert!(text.contains("test_braid_representation"));
        assert!(!text.contains("FusionDouble methods:"));
        assert!(!text.contains("FMatrix methods:"));
    }

    #[test]
    fn test_declared_order_preserved() {
        let text = catalog("f_matrix");
        let first = text.find("- attempt_number_field_computation").unwrap();
        let last = text.find("- start_worker_pool").unwrap();
        let middle = text.find("- fmatrix\n").unwrap();
        assert!(first < middle && middle < last);
        assert!(text.ends_with("- start_worker_pool"));
    }

    #[test]
    fn test_all_is_superset_of_every_scope() {
        let all = catalog("all");
        let all_lines: Vec<&str> = all.lines().collect();
        for scope in ["fusion_ring", "fusion_double", "f_matrix"] {
            let text = catalog(scope);
            assert!(all_lines.len() > text.lines().count());
            for line in text.lines() {
                assert!(all_lines.contains(&line), "{} missing {:?}", scope, line);
            }
        }
    }

    #[test]
    fn test_all_section_order() {
        let all = catalog("all");
        let ring = all.find("FusionRing methods:").unwrap();
        let double = all.find("FusionDouble methods:").unwrap();
        let fmatrix = all.find("FMatrix methods:").unwrap();
        assert!(ring < double && double < fmatrix);
    }
}
