use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polykit::geom2::Triangulation;
use polykit::{Mat, Poly, PolyRep};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "polykit")]
#[command(about = "Polygon boolean ops, triangulation and cleanup over PolyRep JSON")]
struct Cmd {
    /// Write JSON here instead of stdout
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Union of every polygon in the input
    Union {
        #[arg(long)]
        input: PathBuf,
    },
    /// Intersection of the union of A with the union of B
    Intersect {
        #[arg(long)]
        a: PathBuf,
        #[arg(long)]
        b: PathBuf,
    },
    /// Subtract cutters from the input polygons
    Cut {
        #[arg(long)]
        cutters: PathBuf,
        #[arg(long)]
        input: PathBuf,
        /// Union first, then subtract one cutter at a time
        #[arg(long)]
        safe: bool,
    },
    /// Emit `{vs, tris}` per polygon
    Triangulate {
        #[arg(long)]
        input: PathBuf,
        /// Constrained Delaunay instead of plain ear clipping
        #[arg(long)]
        quality: bool,
    },
    /// Emit one SVG path string per polygon
    Svg {
        #[arg(long)]
        input: PathBuf,
    },
    /// Orientation-fix and snap every polygon, optionally transforming it first
    Clean {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = 4)]
        precision: u32,
        /// CSS-style `matrix(a, b, c, d, e, f)`
        #[arg(long)]
        matrix: Option<String>,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let out = cmd.out.as_deref();
    match cmd.action {
        Action::Union { input } => union(&input, out),
        Action::Intersect { a, b } => intersect(&a, &b, out),
        Action::Cut {
            cutters,
            input,
            safe,
        } => cut(&cutters, &input, safe, out),
        Action::Triangulate { input, quality } => triangulate(&input, quality, out),
        Action::Svg { input } => svg(&input, out),
        Action::Clean {
            input,
            precision,
            matrix,
        } => clean(&input, precision, matrix.as_deref(), out),
    }
}

fn read_polys(path: &Path) -> Result<Vec<Poly>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let reps: Vec<PolyRep> = serde_json::from_str(&text)
        .with_context(|| format!("parsing {} as a list of polygons", path.display()))?;
    Ok(reps.into_iter().map(Poly::from).collect())
}

fn write_json<T: Serialize>(value: &T, out: Option<&Path>) -> Result<()> {
    let body = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
        }
        None => println!("{body}"),
    }
    Ok(())
}

fn reps(polys: &[Poly]) -> Vec<PolyRep> {
    polys.iter().map(Poly::to_rep).collect()
}

fn union(input: &Path, out: Option<&Path>) -> Result<()> {
    let polys = read_polys(input)?;
    let merged = Poly::union(&polys)?;
    tracing::info!(input = %input.display(), polys = polys.len(), result = merged.len(), "union");
    write_json(&reps(&merged), out)
}

fn intersect(a: &Path, b: &Path, out: Option<&Path>) -> Result<()> {
    let (pa, pb) = (read_polys(a)?, read_polys(b)?);
    let result = Poly::intersect(&pa, &pb)?;
    tracing::info!(a = pa.len(), b = pb.len(), result = result.len(), "intersect");
    write_json(&reps(&result), out)
}

fn cut(cutters: &Path, input: &Path, safe: bool, out: Option<&Path>) -> Result<()> {
    let cs = read_polys(cutters)?;
    let polys = read_polys(input)?;
    let result = if safe {
        Poly::cut_out_safely(&cs, &polys)?
    } else {
        Poly::cut_out(&cs, &polys)?
    };
    tracing::info!(cutters = cs.len(), polys = polys.len(), safe, result = result.len(), "cut");
    write_json(&reps(&result), out)
}

fn triangulate(input: &Path, quality: bool, out: Option<&Path>) -> Result<()> {
    let mut polys = read_polys(input)?;
    let tris: Vec<Triangulation> = polys
        .iter_mut()
        .map(|p| {
            p.clean_final_reps();
            if quality {
                p.quality_triangulate()
            } else {
                p.fast_triangulate()
            }
        })
        .collect();
    let count: usize = tris.iter().map(|t| t.tris.len()).sum();
    tracing::info!(polys = polys.len(), quality, triangles = count, "triangulate");
    write_json(&tris, out)
}

fn svg(input: &Path, out: Option<&Path>) -> Result<()> {
    let polys = read_polys(input)?;
    let paths: Vec<String> = polys.iter().map(Poly::svg_path).collect();
    write_json(&paths, out)
}

fn clean(input: &Path, precision: u32, matrix: Option<&str>, out: Option<&Path>) -> Result<()> {
    let m = matrix
        .map(|s| s.parse::<Mat>().with_context(|| format!("bad matrix {s:?}")))
        .transpose()?;
    let polys = read_polys(input)?;
    let cleaned: Vec<Poly> = polys
        .iter()
        .map(|p| p.clean_clone_with_precision(m.as_ref(), None, precision))
        .collect();
    tracing::info!(polys = cleaned.len(), precision, matrix = ?m, "clean");
    write_json(&reps(&cleaned), out)
}
