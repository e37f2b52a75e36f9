//! Text and CSV renderings of a completed Kruskal run.
//!
//! Every writer formats data the generator already produced; none of them
//! recompute decisions or costs.

use std::io::{self, Write};

use spanstep_core::{AlgorithmStep, Edge, KruskalRun};

const STEPS_CSV_HEADER: [&str; 5] = ["Step", "Edge (U-V)", "Action", "MST Edges (so far)", "Total Cost"];
const DETAILED_HEADER: [&str; 8] = [
    "Step",
    "Edge",
    "Wt",
    "Action",
    "Reason",
    "MST after step",
    "Total cost",
    "DSU state (parents)",
];
const EMPTY_CELL: &str = "—";

/// Writes one line per step followed by a one-line outcome.
///
/// # Errors
/// Returns any error raised by `writer`.
///
/// # Examples
/// ```
/// use spanstep_cli::report::write_step_list;
/// use spanstep_core::Graph;
///
/// let run = Graph::sample().run_kruskal().expect("sample graph is valid");
/// let mut out = Vec::new();
/// write_step_list(&run, &mut out).expect("writing to a Vec cannot fail");
/// let text = String::from_utf8(out).expect("output is UTF-8");
/// assert!(text.starts_with("1. Considering edge (D, E) — added."));
/// ```
pub fn write_step_list(run: &KruskalRun, mut writer: impl Write) -> io::Result<()> {
    for (index, step) in run.steps().iter().enumerate() {
        writeln!(
            writer,
            "{}. {} [cost {}]",
            index + 1,
            step.message(),
            step.cost()
        )?;
    }
    writeln!(writer, "{}", outcome_line(run))
}

/// Writes the per-step CSV table with every cell quoted.
///
/// # Errors
/// Returns any error raised by `writer`.
pub fn write_steps_csv(run: &KruskalRun, mut writer: impl Write) -> io::Result<()> {
    write_csv_row(&mut writer, &STEPS_CSV_HEADER.map(str::to_owned))?;
    for (index, step) in run.steps().iter().enumerate() {
        let row = [
            (index + 1).to_string(),
            step.edge().label(),
            step.decision().as_str().to_owned(),
            edge_list(step.mst(), "; "),
            step.cost().to_string(),
        ];
        write_csv_row(&mut writer, &row)?;
    }
    Ok(())
}

/// Writes the final MST as `Edge,Source,Destination,Weight` rows.
///
/// # Errors
/// Returns any error raised by `writer`.
pub fn write_mst_csv(run: &KruskalRun, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "Edge,Source,Destination,Weight")?;
    for edge in run.final_mst() {
        writeln!(
            writer,
            "{} - {},{},{},{}",
            edge.from(),
            edge.to(),
            edge.from(),
            edge.to(),
            edge.weight()
        )?;
    }
    Ok(())
}

/// Writes the plain-text results summary.
///
/// # Errors
/// Returns any error raised by `writer`.
pub fn write_text(run: &KruskalRun, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "Kruskal's Algorithm: Minimum Spanning Tree Results")?;
    writeln!(writer)?;
    writeln!(writer, "Total MST Cost: {}", run.final_cost())?;
    writeln!(writer, "Edges in MST: {}", run.final_mst().len())?;
    writeln!(writer)?;
    writeln!(writer, "Minimum Spanning Tree Edges:")?;
    writeln!(writer, "EDGE (U-V)\tSOURCE (U)\tDESTINATION (V)\tWEIGHT")?;
    for edge in run.final_mst() {
        writeln!(
            writer,
            "{} - {}\t{}\t\t{}\t\t{}",
            edge.from(),
            edge.to(),
            edge.from(),
            edge.to(),
            edge.weight()
        )?;
    }
    if !run.is_spanning_tree() {
        writeln!(writer)?;
        writeln!(writer, "{}", outcome_line(run))?;
    }
    Ok(())
}

/// Writes the tab-separated detailed step table including the reason for each
/// decision and the disjoint-set parents after it.
///
/// # Errors
/// Returns any error raised by `writer`.
pub fn write_detailed(run: &KruskalRun, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "{}", DETAILED_HEADER.join("\t"))?;
    for (index, step) in run.steps().iter().enumerate() {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            index + 1,
            step.edge().label(),
            step.edge().weight(),
            step.decision(),
            reason(step),
            non_empty(edge_list(step.mst(), ", ")),
            step.cost(),
            step.dsu().compact()
        )?;
    }
    Ok(())
}

const fn reason(step: &AlgorithmStep) -> &'static str {
    if step.decision().is_added() {
        "Connected different components"
    } else {
        "Forms a cycle (skipped)"
    }
}

fn outcome_line(run: &KruskalRun) -> String {
    if run.is_spanning_tree() {
        format!(
            "Minimum spanning tree: {} edges, total cost {}",
            run.final_mst().len(),
            run.final_cost()
        )
    } else {
        format!(
            "Minimum spanning forest: {} edges across {} components, total cost {}",
            run.final_mst().len(),
            run.component_count(),
            run.final_cost()
        )
    }
}

fn edge_list(edges: &[Edge], separator: &str) -> String {
    edges
        .iter()
        .map(|edge| format!("{}({})", edge.label(), edge.weight()))
        .collect::<Vec<_>>()
        .join(separator)
}

fn non_empty(cell: String) -> String {
    if cell.is_empty() {
        EMPTY_CELL.to_owned()
    } else {
        cell
    }
}

fn write_csv_row(writer: &mut impl Write, cells: &[String]) -> io::Result<()> {
    let quoted: Vec<String> = cells
        .iter()
        .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
        .collect();
    writeln!(writer, "{}", quoted.join(","))
}
