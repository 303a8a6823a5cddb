//! Snippet shapes for each tool
//!
//! Caller values are always bound as literals; caller expressions are
//! bound as string literals and evaluated engine-side with `sage_eval`.

use crate::engine::{PyValue, SnippetBuilder};
use crate::tools::types::FusionRingSpec;

const SAGE_IMPORTS: [&str; 2] = [
    "from sage.all import *",
    "from sage.misc.sage_eval import sage_eval",
];

const FUSION_RING_IMPORT: &str = "from sage.algebras.fusion_rings.fusion_ring import FusionRing";

/// Best-effort parse of the Cartan type; a malformed structured form
/// degrades to the plain string and never raises.
const CT_FALLBACK: &str = "\
try:
    ct_obj = sage_eval(ct_text, locals())
except Exception:
    ct_obj = ct_text";

const OPTIONAL_KWARGS: &str = "\
if cyclo is not None:
    kwargs['cyclotomic_order'] = cyclo";

const OPTIONAL_LABELS: &str = "\
if lbls is not None:
    kwargs['fusion_labels'] = lbls";

const FUSION_RULES_TABLE: &str = r#"labels = [str(s) for s in simples]
print(f'Fusion rules for FusionRing(ct={ct_text}, k={kwargs["k"]})')
print(f'Rank: {len(simples)}')
print('Simple object order:')
for idx, lbl in enumerate(labels):
    print(f'  [{idx}] {lbl}')
print('')
for i, a in enumerate(simples):
    for j, b in enumerate(simples):
        terms = []
        for kk, c in enumerate(simples):
            coeff = FR.Nk_ij(a, b, c)
            if coeff:
                if coeff == 1:
                    terms.append(labels[kk])
                else:
                    terms.append(f'{coeff}*{labels[kk]}')
        rhs = ' + '.join(terms) if terms else '0'
        print(f'[{i}] {labels[i]} * [{j}] {labels[j]} = {rhs}')"#;

fn sage_preamble() -> SnippetBuilder {
    SnippetBuilder::new().lines(SAGE_IMPORTS)
}

/// Evaluate one expression and print it
pub fn eval_snippet(expression: &str) -> String {
    sage_preamble()
        .bind("expr", expression)
        .line("result = sage_eval(expr, locals())")
        .line("print(result)")
        .build()
}

/// Solve one equation for one variable
pub fn solve_snippet(equation: &str, variable: &str) -> String {
    sage_preamble()
        .bind("var_name", variable)
        .line("v = var(var_name)")
        .bind("eq_text", equation)
        .line("eq = sage_eval(eq_text, locals())")
        .line("print(solve(eq, v))")
        .build()
}

/// Shared environment: builds `FR` plus `order` and `simples`
fn fusion_ring_env(ring: &FusionRingSpec) -> SnippetBuilder {
    sage_preamble()
        .line(FUSION_RING_IMPORT)
        .bind("ct_text", ring.ct.as_str())
        .raw(CT_FALLBACK)
        .line("kwargs = {}")
        .line(format!("kwargs['conjugate'] = {}", PyValue::from(ring.conjugate)))
        .line(format!("kwargs['inject_variables'] = {}", PyValue::from(ring.inject_variables)))
        .line(format!("kwargs['k'] = {}", PyValue::from(ring.k)))
        .bind("cyclo", ring.cyclotomic_order)
        .raw(OPTIONAL_KWARGS)
        .bind("lbls", ring.fusion_labels.as_deref())
        .raw(OPTIONAL_LABELS)
        .line("FR = FusionRing(ct_obj, **kwargs)")
}

/// Evaluate an expression with `FR`, `R`, `basis`, `order` and `simples`
/// in scope
pub fn fusion_ring_eval_snippet(ring: &FusionRingSpec, expression: &str) -> String {
    fusion_ring_env(ring)
        .line("R = FR")
        .line("basis = FR.basis()")
        .line("order = FR.get_order()")
        .line("simples = [FR(w) for w in order]")
        .bind("expr", expression)
        .line("result = sage_eval(expr, locals())")
        .line("print(result)")
        .build()
}

/// Print the full table of fusion rules `N^k_{ij}`
pub fn fusion_rules_snippet(ring: &FusionRingSpec) -> String {
    fusion_ring_env(ring)
        .line("order = FR.get_order()")
        .line("simples = [FR(w) for w in order]")
        .raw(FUSION_RULES_TABLE)
        .build()
}
