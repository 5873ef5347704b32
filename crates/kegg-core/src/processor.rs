use crate::config::MissingPolicy;
use crate::dedup::DedupState;
use crate::error::{KeggError, Result};
use crate::kinds::IdKind;
use crate::lookup::LookupTables;
use crate::relations::{EdgeTyping, LinkShape};
use crate::sink::GraphSink;
use crate::types::{Edge, Node, WriteMode};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Outcome of processing one link file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FileReport {
    /// Display name of the input (usually its path).
    pub file: String,
    /// Shape the header classified to. `None` means blank predicate/relation.
    pub shape: Option<LinkShape>,
    pub rows: u64,
    pub nodes_written: u64,
    pub edges_written: u64,
    pub duplicate_nodes: u64,
    pub duplicate_edges: u64,
    pub skipped_rows: u64,
}

/// Turns one link file into node and edge rows.
///
/// Each row's identifiers are resolved to display names through the
/// lookup tables, typed from the header shape, and written unless the
/// shared `DedupState` has already seen them.
pub struct LinkFileProcessor<'a> {
    tables: &'a LookupTables,
    on_missing: MissingPolicy,
}

impl<'a> LinkFileProcessor<'a> {
    pub fn new(tables: &'a LookupTables) -> Self {
        Self {
            tables,
            on_missing: MissingPolicy::default(),
        }
    }

    pub fn with_missing_policy(mut self, policy: MissingPolicy) -> Self {
        self.on_missing = policy;
        self
    }

    /// Process every data row of `reader`.
    ///
    /// In `Overwrite` mode the table headers are written first. Rows are
    /// streamed to `sink` as they are produced and `state` is updated in
    /// place.
    pub fn process<R, S>(
        &self,
        file: &str,
        reader: R,
        sink: &mut S,
        mode: WriteMode,
        state: &mut DedupState,
    ) -> Result<FileReport>
    where
        R: Read,
        S: GraphSink + ?Sized,
    {
        if mode == WriteMode::Overwrite {
            sink.write_headers()?;
        }

        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_reader(reader);

        let header: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let shape = LinkShape::classify(&header);
        match shape {
            Some(shape) => info!("Processing {} as {} ({})", file, shape, mode),
            None => warn!(
                "Unexpected column names in {}: {:?}; edges will have no predicate or relation",
                file, header
            ),
        }
        let typing = EdgeTyping::for_shape(shape);
        let kinds: Vec<Option<IdKind>> = header.iter().map(|c| IdKind::from_column(c)).collect();

        let mut report = FileReport {
            file: file.to_string(),
            shape,
            ..FileReport::default()
        };

        for result in rdr.records() {
            let record = result.map_err(row_error)?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            report.rows += 1;

            let Some(resolved) = self.resolve_row(&header, &kinds, &record, line)? else {
                report.skipped_rows += 1;
                continue;
            };

            let mut subject = String::new();
            let mut object = String::new();
            for (i, (kind, raw, name)) in resolved.iter().enumerate() {
                let node = Node::new(*kind, raw, name.as_str());
                if i == 0 {
                    subject = node.id.clone();
                } else {
                    object = node.id.clone();
                }

                if state.insert_node(raw) {
                    sink.write_node(&node)?;
                    report.nodes_written += 1;
                } else {
                    report.duplicate_nodes += 1;
                }
            }

            let raws: Vec<&str> = resolved.iter().map(|(_, raw, _)| *raw).collect();
            let edge_key = DedupState::edge_key(&raws);
            if state.insert_edge(&edge_key) {
                sink.write_edge(&Edge {
                    subject,
                    predicate: typing.predicate.clone(),
                    object,
                    relation: typing.relation.clone(),
                })?;
                report.edges_written += 1;
            } else {
                debug!("{}: edge {} already written", file, edge_key);
                report.duplicate_edges += 1;
            }
        }

        info!(
            "{}: {} rows, {} new nodes, {} new edges, {} skipped",
            file, report.rows, report.nodes_written, report.edges_written, report.skipped_rows
        );
        Ok(report)
    }

    /// Resolve every column of a row before anything is written.
    /// `Ok(None)` means the row is skipped under `MissingPolicy::SkipRow`.
    fn resolve_row<'r>(
        &self,
        header: &[String],
        kinds: &[Option<IdKind>],
        record: &'r csv::StringRecord,
        line: u64,
    ) -> Result<Option<Vec<(IdKind, &'r str, String)>>> {
        let mut resolved = Vec::with_capacity(record.len());

        for ((column, kind), raw) in header.iter().zip(kinds).zip(record.iter()) {
            let kind = kind.ok_or_else(|| KeggError::UnknownColumn {
                column: column.clone(),
            })?;

            let name = match self.tables.resolve(kind, raw) {
                Some(name) => name.to_string(),
                None => match self.on_missing {
                    MissingPolicy::Abort => {
                        return Err(KeggError::UnresolvedIdentifier {
                            kind,
                            id: raw.to_string(),
                            line,
                        })
                    }
                    MissingPolicy::SkipRow => {
                        warn!("Skipping line {}: {} '{}' not in lookup table", line, kind, raw);
                        return Ok(None);
                    }
                    MissingPolicy::Placeholder => {
                        debug!("Line {}: {} '{}' not in lookup table, using id as name", line, kind, raw);
                        raw.to_string()
                    }
                },
            };
            resolved.push((kind, raw, name));
        }

        Ok(Some(resolved))
    }
}

fn row_error(err: csv::Error) -> KeggError {
    match err.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => KeggError::MalformedRow {
            line: pos.as_ref().map(|p| p.line()).unwrap_or(0),
            expected: *expected_len as usize,
            found: *len as usize,
        },
        _ => KeggError::Csv(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::LookupTable;
    use crate::sink::TsvGraphWriter;

    fn tables() -> LookupTables {
        let mut compound = LookupTable::new(IdKind::Compound);
        compound.insert("C00001", "Glycolysis intermediate");
        compound.insert("C00031", "D-Glucose");
        let mut reaction = LookupTable::new(IdKind::Reaction);
        reaction.insert("R00010", "alpha,alpha-trehalose glucohydrolase");
        let mut pathway = LookupTable::new(IdKind::Pathway);
        pathway.insert("map00010", "Glycolysis");
        pathway.insert("map00500", "Starch and sucrose metabolism");
        let mut orthology = LookupTable::new(IdKind::Orthology);
        orthology.insert("K00844", "hexokinase");
        LookupTables::new(compound, reaction, pathway, orthology).unwrap()
    }

    struct Output {
        report: FileReport,
        nodes: Vec<String>,
        edges: Vec<String>,
    }

    fn run(
        input: &str,
        mode: WriteMode,
        policy: MissingPolicy,
        state: &mut DedupState,
    ) -> Result<Output> {
        let _ = env_logger::builder().is_test(true).try_init();
        let tables = tables();
        let processor = LinkFileProcessor::new(&tables).with_missing_policy(policy);
        let mut sink = TsvGraphWriter::new(Vec::new(), Vec::new());
        let report = processor.process("test.tsv", input.as_bytes(), &mut sink, mode, state)?;
        let (nodes, edges) = sink.into_inner()?;
        let lines = |buf: Vec<u8>| {
            String::from_utf8(buf)
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect::<Vec<_>>()
        };
        Ok(Output {
            report,
            nodes: lines(nodes),
            edges: lines(edges),
        })
    }

    fn run_append(input: &str) -> Output {
        run(input, WriteMode::Append, MissingPolicy::Abort, &mut DedupState::new()).unwrap()
    }

    #[test]
    fn test_worked_example() {
        let out = run_append("cpdId\tpathwayId\nC00001\tmap00010\n");
        assert_eq!(
            out.nodes,
            vec![
                "KEGG.COMPOUND:C00001\tGlycolysis intermediate\tbiolink:ChemicalSubstance",
                "KEGG.PATHWAY:map00010\tGlycolysis\tbiolink:Pathway",
            ]
        );
        assert_eq!(
            out.edges,
            vec!["KEGG.COMPOUND:C00001\tbiolink:has_participant\tKEGG.PATHWAY:map00010\tRO:0000057"]
        );
        assert_eq!(out.report.shape, Some(LinkShape::PathwayCompound));
    }

    #[test]
    fn test_subject_follows_column_order() {
        let out = run_append("pathwayId\tcpdId\nmap00010\tC00001\n");
        assert_eq!(
            out.edges,
            vec!["KEGG.PATHWAY:map00010\tbiolink:has_participant\tKEGG.COMPOUND:C00001\tRO:0000057"]
        );
    }

    #[test]
    fn test_every_shape_types_its_edges() {
        let cases = [
            ("pathwayId\tcpdId\nmap00010\tC00031\n", "KEGG.PATHWAY:map00010", "KEGG.COMPOUND:C00031"),
            ("rnId\tcpdId\nR00010\tC00031\n", "KEGG.REACTION:R00010", "KEGG.COMPOUND:C00031"),
            ("pathwayId\trnId\nrn00500\tR00010\n", "KEGG.PATHWAY:rn00500", "KEGG.REACTION:R00010"),
            ("pathwayId\tkoId\nko00010\tK00844\n", "KEGG.PATHWAY:ko00010", "KEGG.ORTHOLOGY:K00844"),
            ("rnId\tkoId\nR00010\tK00844\n", "KEGG.REACTION:R00010", "KEGG.ORTHOLOGY:K00844"),
        ];
        for (input, subject, object) in cases {
            let out = run_append(input);
            assert!(out.report.shape.is_some(), "{}", input);
            assert_eq!(
                out.edges,
                vec![format!("{}\tbiolink:has_participant\t{}\tRO:0000057", subject, object)],
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_pathway_variant_ids_keep_raw_curie() {
        let out = run_append("pathwayId\trnId\nrn00010\tR00010\n");
        assert_eq!(out.nodes[0], "KEGG.PATHWAY:rn00010\tGlycolysis\tbiolink:Pathway");

        let out = run_append("koId\tpathwayId\nK00844\tko00010\n");
        assert_eq!(out.nodes[1], "KEGG.PATHWAY:ko00010\tGlycolysis\tbiolink:Pathway");
    }

    #[test]
    fn test_overwrite_writes_headers_first() {
        let out = run(
            "cpdId\tpathwayId\nC00001\tmap00010\n",
            WriteMode::Overwrite,
            MissingPolicy::Abort,
            &mut DedupState::new(),
        )
        .unwrap();
        assert_eq!(out.nodes[0], "id\tname\tcategory");
        assert_eq!(out.edges[0], "subject\tpredicate\tobject\trelation");
        assert_eq!(out.nodes.len(), 3);
        assert_eq!(out.edges.len(), 2);
    }

    #[test]
    fn test_unknown_shape_degrades_to_blank_typing() {
        let out = run_append("cpdId\tkoId\nC00031\tK00844\n");
        assert_eq!(out.report.shape, None);
        assert_eq!(
            out.nodes,
            vec![
                "KEGG.COMPOUND:C00031\tD-Glucose\tbiolink:ChemicalSubstance",
                "KEGG.ORTHOLOGY:K00844\thexokinase\tbiolink:GeneFamily",
            ]
        );
        assert_eq!(out.edges, vec!["KEGG.COMPOUND:C00031\t\tKEGG.ORTHOLOGY:K00844\t"]);
    }

    #[test]
    fn test_duplicates_within_file() {
        let input = "pathwayId\tcpdId\nmap00010\tC00001\nmap00010\tC00031\nmap00010\tC00001\n";
        let out = run_append(input);
        assert_eq!(out.nodes.len(), 3);
        assert_eq!(out.edges.len(), 2);
        assert_eq!(out.report.rows, 3);
        assert_eq!(out.report.duplicate_nodes, 3);
        assert_eq!(out.report.duplicate_edges, 1);
    }

    #[test]
    fn test_state_carries_across_calls() {
        let mut state = DedupState::new();
        let first = run(
            "pathwayId\tcpdId\nmap00010\tC00001\n",
            WriteMode::Overwrite,
            MissingPolicy::Abort,
            &mut state,
        )
        .unwrap();
        let second = run(
            "rnId\tcpdId\nR00010\tC00001\n",
            WriteMode::Append,
            MissingPolicy::Abort,
            &mut state,
        )
        .unwrap();

        assert_eq!(first.report.nodes_written, 2);
        assert_eq!(second.report.nodes_written, 1);
        assert_eq!(second.nodes, vec!["KEGG.REACTION:R00010\talpha,alpha-trehalose glucohydrolase\tbiolink:MolecularActivity"]);
        assert_eq!(state.node_count(), 3);
        assert_eq!(state.edge_count(), 2);
    }

    #[test]
    fn test_reversed_pair_is_a_distinct_edge() {
        let mut state = DedupState::new();
        run("pathwayId\tcpdId\nmap00010\tC00001\n", WriteMode::Append, MissingPolicy::Abort, &mut state).unwrap();
        let out = run("cpdId\tpathwayId\nC00001\tmap00010\n", WriteMode::Append, MissingPolicy::Abort, &mut state).unwrap();
        assert!(out.nodes.is_empty());
        assert_eq!(out.edges.len(), 1);
    }

    #[test]
    fn test_lookup_miss_aborts() {
        let err = run(
            "cpdId\tpathwayId\nC00001\tmap00010\nC99999\tmap00010\n",
            WriteMode::Append,
            MissingPolicy::Abort,
            &mut DedupState::new(),
        )
        .err()
        .unwrap();
        match err {
            KeggError::UnresolvedIdentifier { kind, id, line } => {
                assert_eq!(kind, IdKind::Compound);
                assert_eq!(id, "C99999");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_lookup_miss_skip_row_writes_nothing_for_row() {
        let input = "cpdId\tpathwayId\nC00001\tmap99999\nC00031\tmap00010\n";
        let out = run(input, WriteMode::Append, MissingPolicy::SkipRow, &mut DedupState::new()).unwrap();
        assert_eq!(out.report.skipped_rows, 1);
        assert_eq!(
            out.nodes,
            vec![
                "KEGG.COMPOUND:C00031\tD-Glucose\tbiolink:ChemicalSubstance",
                "KEGG.PATHWAY:map00010\tGlycolysis\tbiolink:Pathway",
            ]
        );
        assert_eq!(out.edges.len(), 1);
    }

    #[test]
    fn test_lookup_miss_placeholder_uses_raw_id() {
        let out = run(
            "cpdId\tpathwayId\nC99999\tmap00010\n",
            WriteMode::Append,
            MissingPolicy::Placeholder,
            &mut DedupState::new(),
        )
        .unwrap();
        assert_eq!(out.nodes[0], "KEGG.COMPOUND:C99999\tC99999\tbiolink:ChemicalSubstance");
    }

    #[test]
    fn test_malformed_row() {
        let err = run_err("cpdId\tpathwayId\nC00001\tmap00010\tmap00500\n");
        assert!(matches!(
            err,
            KeggError::MalformedRow {
                line: 2,
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn test_unknown_column_kind() {
        let err = run_err("cpdId\tgeneId\nC00001\thsa:3098\n");
        assert!(matches!(err, KeggError::UnknownColumn { column } if column == "geneId"));
    }

    #[test]
    fn test_header_only_file() {
        let out = run_append("rnId\tkoId\n");
        assert_eq!(out.report.rows, 0);
        assert!(out.nodes.is_empty());
        assert!(out.edges.is_empty());
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let out = run_append("rnId\tkoId\nR00010\tK00844\n\n");
        assert_eq!(out.report.rows, 1);
        assert_eq!(out.edges.len(), 1);
    }

    #[test]
    fn test_fields_are_not_trimmed() {
        match run_err("rnId\tkoId\nR00010 \tK00844\n") {
            KeggError::UnresolvedIdentifier { kind, id, .. } => {
                assert_eq!(kind, IdKind::Reaction);
                assert_eq!(id, "R00010 ");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    fn run_err(input: &str) -> KeggError {
        run(input, WriteMode::Append, MissingPolicy::Abort, &mut DedupState::new())
            .err()
            .unwrap()
    }
}
