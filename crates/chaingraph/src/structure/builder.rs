//! Graph building: raw chain records to [`Chain`]s.
//!
//! Building happens in two phases per chain. First every element becomes a
//! node and a label-to-node map is filled; then each `<child>` name is looked
//! up in that map and turned into an edge. Problems are collected for the
//! whole chain (and, in [`build_chains`], for every chain) before failing.

use indexmap::{IndexMap, IndexSet, map::Entry};
use log::{debug, warn};

use chaingraph_parser::{
    ChainRecord, ElementRecord,
    error::{Diagnostic, DiagnosticCollector, DiagnosticError, ErrorCode},
};

use super::{
    chain::{Chain, GraphNode, normalize_name},
    graph_base::{GraphInternal, NodeIndex},
};

/// Build every chain of a document.
///
/// # Errors
///
/// Returns the structure diagnostics (`E2xx`) of all failing chains
/// together.
pub fn build_chains(records: &[ChainRecord]) -> Result<Vec<Chain>, DiagnosticError> {
    let mut diagnostics = DiagnosticCollector::new();
    let mut chains = Vec::with_capacity(records.len());

    for record in records {
        match build_chain(record) {
            Ok(chain) => chains.push(chain),
            Err(err) => diagnostics.absorb(err),
        }
    }
    diagnostics.finish()?;

    warn_on_name_collisions(&chains);
    Ok(chains)
}

/// Build one chain from its raw records.
///
/// # Errors
///
/// Returns a [`DiagnosticError`] if the chain does not have exactly one
/// root ([`ErrorCode::E200`], [`ErrorCode::E201`]), a child name matches no
/// element ([`ErrorCode::E202`]), a label is used by more than one element
/// ([`ErrorCode::E203`]), or the root has no resolved children
/// ([`ErrorCode::E204`]).
pub fn build_chain(record: &ChainRecord) -> Result<Chain, DiagnosticError> {
    let mut diagnostics = DiagnosticCollector::new();
    let name = record.name();
    let elements = record.elements();

    let roots: Vec<usize> = elements
        .iter()
        .enumerate()
        .filter(|(_, element)| element.is_root())
        .map(|(position, _)| position)
        .collect();
    check_roots(record, &roots, &mut diagnostics);

    // Phase 1: one node per element, and the label lookup table.
    let mut graph = GraphInternal::new();
    let mut by_label: IndexMap<&str, (NodeIndex, &ElementRecord)> = IndexMap::new();
    let mut duplicated: IndexSet<&str> = IndexSet::new();
    let mut indices = Vec::with_capacity(elements.len());

    for element in elements {
        let idx = graph.add_node(GraphNode::new(element.label(), element.type_name()));
        indices.push(idx);

        match by_label.entry(element.label()) {
            Entry::Vacant(slot) => {
                slot.insert((idx, element));
            }
            Entry::Occupied(first) => {
                duplicated.insert(element.label());
                diagnostics.emit(
                    Diagnostic::error(format!(
                        "label `{}` is defined more than once in chain `{name}` \
                         (positions {} and {})",
                        element.label(),
                        first.get().1.position(),
                        element.position()
                    ))
                    .with_code(ErrorCode::E203)
                    .with_label(element.span(), "duplicate label")
                    .with_secondary_label(first.get().1.span(), "first defined here")
                    .with_help("labels must be unique within a chain"),
                );
            }
        }
    }

    // Phase 2: resolve child names into edges.
    for (element, &source) in elements.iter().zip(&indices) {
        for child in element.children() {
            let Some(&(target, _)) = by_label.get(child.name()) else {
                diagnostics.emit(
                    Diagnostic::error(format!(
                        "element `{}` in chain `{name}` references unknown child `{}`",
                        element.label(),
                        child.name()
                    ))
                    .with_code(ErrorCode::E202)
                    .with_label(child.span(), "no element has this label")
                    .with_help(format!(
                        "add an element labelled `{}` or remove the reference",
                        child.name()
                    )),
                );
                continue;
            };

            if duplicated.contains(child.name()) {
                diagnostics.emit(
                    Diagnostic::error(format!(
                        "reference to `{}` in chain `{name}` is ambiguous",
                        child.name()
                    ))
                    .with_code(ErrorCode::E203)
                    .with_label(child.span(), "matches more than one element"),
                );
                continue;
            }

            graph.add_edge(source, target);
        }
    }

    // The root must lead somewhere.
    if let [root] = roots[..] {
        if graph.outgoing_nodes(indices[root]).next().is_none() {
            let element = &elements[root];
            diagnostics.emit(
                Diagnostic::error(format!(
                    "root element `{}` of chain `{name}` has no children",
                    element.label()
                ))
                .with_code(ErrorCode::E204)
                .with_label(element.span(), "root element")
                .with_help("add a `<child>` naming another element of the chain"),
            );
        }
    }

    diagnostics.finish()?;

    // Exactly one root exists once no errors were reported.
    let chain = Chain::new(name, indices[roots[0]], graph);
    debug!(
        chain = name,
        nodes_count = chain.nodes_count(),
        edges_count = chain.edges_count(),
        references_count = record.reference_count();
        "Chain built"
    );

    for idx in chain.unreachable_nodes() {
        if let Some(node) = chain.node(idx) {
            warn!(chain = name, element = node.label(); "Element is not reachable from the root");
        }
    }
    if chain.contains_cycle() {
        warn!(chain = name; "Chain contains a reference cycle");
    }

    Ok(chain)
}

fn check_roots(record: &ChainRecord, roots: &[usize], diagnostics: &mut DiagnosticCollector) {
    let name = record.name();
    match roots {
        [] => diagnostics.emit(
            Diagnostic::error(format!("chain `{name}` has no root element"))
                .with_code(ErrorCode::E200)
                .with_label(record.span(), "every element has a `<parent>`")
                .with_help("exactly one element of a chain must omit `<parent>`"),
        ),
        [_] => {}
        _ => {
            let elements = record.elements();
            let labels: Vec<String> = roots
                .iter()
                .map(|&position| format!("`{}`", elements[position].label()))
                .collect();

            let diagnostic = roots.iter().fold(
                Diagnostic::error(format!(
                    "chain `{name}` has {} root elements: {}",
                    roots.len(),
                    labels.join(", ")
                ))
                .with_code(ErrorCode::E201)
                .with_help("mark all but one of them with `<parent/>`"),
                |diagnostic, &position| {
                    diagnostic.with_label(elements[position].span(), "element without `<parent>`")
                },
            );
            diagnostics.emit(diagnostic);
        }
    }
}

fn warn_on_name_collisions(chains: &[Chain]) {
    let mut seen: IndexMap<String, &str> = IndexMap::new();
    for chain in chains {
        match seen.entry(normalize_name(chain.name())) {
            Entry::Vacant(slot) => {
                slot.insert(chain.name());
            }
            Entry::Occupied(first) => {
                warn!(
                    base_name = first.key(),
                    first = *first.get(),
                    second = chain.name();
                    "Chains share an output name, later artifacts overwrite earlier ones"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chaingraph_parser::parse;

    use super::*;

    /// An element as `(label, children, has_parent)`.
    type ElementDef<'a> = (&'a str, &'a [&'a str], bool);

    fn source_of(name: &str, elements: &[ElementDef]) -> String {
        let body: String = elements
            .iter()
            .map(|(label, children, has_parent)| {
                let children: String = children
                    .iter()
                    .map(|child| format!("<child>{child}</child>"))
                    .collect();
                let parent = if *has_parent { "<parent/>" } else { "" };
                format!("<element><label>{label}</label><type>t</type>{children}{parent}</element>")
            })
            .collect();
        format!("<rmod><chain><name>{name}</name>{body}</chain></rmod>")
    }

    fn build(name: &str, elements: &[ElementDef]) -> Result<Chain, DiagnosticError> {
        let records = parse(&source_of(name, elements)).expect("test document must parse");
        build_chain(&records[0])
    }

    fn assert_fails_with(result: Result<Chain, DiagnosticError>, code: ErrorCode) -> DiagnosticError {
        match result {
            Ok(chain) => panic!("Expected {code}, but built {chain:?}"),
            Err(err) => {
                assert!(
                    err.has_code(code),
                    "Expected {code}, got: {:?}",
                    err.diagnostics()
                );
                err
            }
        }
    }

    #[test]
    fn test_demo_chain() {
        let chain = build(
            "Demo Chain",
            &[("A", &["B", "C"], false), ("B", &[], true), ("C", &[], true)],
        )
        .expect("demo chain builds");

        assert_eq!(chain.root().label(), "A");
        assert_eq!(chain.nodes_count(), 3);
        assert_eq!(chain.edges_count(), 2);
        assert_eq!(chain.base_name(), "Demo_Chain");

        let edges: Vec<(&str, &str)> = chain
            .edges()
            .map(|(parent, child)| (parent.label(), child.label()))
            .collect();
        assert_eq!(edges, [("A", "B"), ("A", "C")]);
    }

    #[test]
    fn test_root_need_not_be_first() {
        let chain = build("late root", &[("B", &[], true), ("A", &["B"], false)])
            .expect("chain builds");

        assert_eq!(chain.root().label(), "A");
        assert_eq!(chain.root_index().index(), 1);
    }

    #[test]
    fn test_no_root() {
        let result = build("Demo", &[("A", &["B"], true), ("B", &[], true)]);
        assert_fails_with(result, ErrorCode::E200);
    }

    #[test]
    fn test_multiple_roots() {
        let result = build("Demo", &[("A", &["B"], false), ("B", &[], false)]);
        let err = assert_fails_with(result, ErrorCode::E201);

        let diag = &err.diagnostics()[0];
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.message().contains("`A`, `B`"));
    }

    #[test]
    fn test_dangling_reference() {
        let result = build("Demo", &[("A", &["B", "X"], false), ("B", &[], true)]);
        let err = assert_fails_with(result, ErrorCode::E202);

        let message = err.diagnostics()[0].message();
        assert!(message.contains("`X`"), "message: {message}");
        assert!(message.contains("`A`"), "message: {message}");
    }

    #[test]
    fn test_root_with_only_dangling_children() {
        let result = build("Demo", &[("A", &["X"], false), ("B", &[], true)]);
        assert_fails_with(result, ErrorCode::E202);
    }

    #[test]
    fn test_duplicate_label() {
        let result = build(
            "Demo",
            &[("A", &["B"], false), ("B", &[], true), ("B", &[], true)],
        );
        let err = assert_fails_with(result, ErrorCode::E203);

        let message = err.diagnostics()[0].message();
        assert!(message.contains("positions 2 and 3"), "message: {message}");
        assert!(
            err.diagnostics()
                .iter()
                .any(|d| d.labels().iter().any(|l| l.is_secondary()))
        );
        // Both the definition and the reference are reported
        let ambiguous = err
            .diagnostics()
            .iter()
            .filter(|d| d.code() == Some(ErrorCode::E203))
            .count();
        assert_eq!(ambiguous, 2);
    }

    #[test]
    fn test_degenerate_root() {
        let result = build("Demo", &[("A", &[], false), ("B", &[], true)]);
        assert_fails_with(result, ErrorCode::E204);
    }

    #[test]
    fn test_single_node_chain() {
        let result = build("Demo", &[("A", &[], false)]);
        assert_fails_with(result, ErrorCode::E204);
    }

    #[test]
    fn test_errors_are_collected() {
        let result = build(
            "Demo",
            &[("A", &["X"], false), ("B", &["Y"], false)],
        );
        let err = assert_fails_with(result, ErrorCode::E201);

        assert!(err.has_code(ErrorCode::E202));
        let dangling = err
            .diagnostics()
            .iter()
            .filter(|d| d.code() == Some(ErrorCode::E202))
            .count();
        assert_eq!(dangling, 2);
    }

    #[test]
    fn test_shared_child() {
        let chain = build(
            "diamond",
            &[
                ("top", &["left", "right"], false),
                ("left", &["bottom"], true),
                ("right", &["bottom"], true),
                ("bottom", &[], true),
            ],
        )
        .expect("diamond builds");

        assert_eq!(chain.nodes_count(), 4);
        assert_eq!(chain.edges_count(), 4);
        assert!(!chain.contains_cycle());
    }

    #[test]
    fn test_cycles_are_accepted() {
        let chain = build("loop", &[("A", &["B"], false), ("B", &["A"], true)])
            .expect("cycles are not rejected");

        assert!(chain.contains_cycle());
        assert_eq!(chain.edges_count(), 2);
    }

    #[test]
    fn test_self_reference_is_accepted() {
        let chain = build("self", &[("A", &["A", "B"], false), ("B", &[], true)])
            .expect("self references resolve");

        assert_eq!(chain.edges_count(), 2);
    }

    #[test]
    fn test_repeated_reference_gives_one_edge_each() {
        let chain = build("twice", &[("A", &["B", "B"], false), ("B", &[], true)])
            .expect("chain builds");

        assert_eq!(chain.edges_count(), 2);
    }

    #[test]
    fn test_unreachable_elements_are_accepted() {
        let chain = build(
            "island",
            &[("A", &["B"], false), ("B", &[], true), ("C", &[], true)],
        )
        .expect("unreachable elements only warn");

        assert_eq!(chain.unreachable_nodes().len(), 1);
    }

    #[test]
    fn test_build_chains_collects_across_chains() {
        let source = "<rmod>\
            <chain><name>ok</name>\
                <element><label>A</label><type>t</type><child>B</child></element>\
                <element><label>B</label><type>t</type><parent/></element>\
            </chain>\
            <chain><name>bad one</name>\
                <element><label>A</label><type>t</type></element>\
            </chain>\
            <chain><name>bad two</name>\
                <element><label>A</label><type>t</type><parent/></element>\
            </chain>\
        </rmod>";
        let records = parse(source).expect("document parses");

        let err = build_chains(&records).expect_err("two chains are invalid");
        assert!(err.has_code(ErrorCode::E204));
        assert!(err.has_code(ErrorCode::E200));
        assert_eq!(err.diagnostics().len(), 2);
    }

    #[test]
    fn test_build_chains_keeps_order() {
        let source = "<rmod>\
            <chain><name>first</name>\
                <element><label>A</label><type>t</type><child>B</child></element>\
                <element><label>B</label><type>t</type><parent/></element>\
            </chain>\
            <chain><name>second</name>\
                <element><label>X</label><type>t</type><child>Y</child></element>\
                <element><label>Y</label><type>t</type><parent/></element>\
            </chain>\
        </rmod>";
        let records = parse(source).expect("document parses");

        let chains = build_chains(&records).expect("document builds");
        let names: Vec<&str> = chains.iter().map(Chain::name).collect();
        assert_eq!(names, ["first", "second"]);
    }
}
