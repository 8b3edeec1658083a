use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use polywalk::frank_wolfe::{project, FwCfg};
use polywalk::geom2::rand::{draw_tangent_polygon, ReplayToken, TangentCfg, VertexCount};
use polywalk::geom2::raster::{DEFAULT_NX, DEFAULT_NY};
use polywalk::geom2::{
    enumerate_vertices, feasibility_grid, find_vertices, BoundingBox, GeomCfg, Hs2,
};
use polywalk::Vec2;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod table;

use provenance::{write_sidecar, Payload};

/// `(x, y)` or `(lo, hi)` from the command line.
type Pair = (f64, f64);

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Vertices, rasters and projections for polygons given as Ax <= b")]
struct Cmd {
    /// Optional run tag; propagated to outputs and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

/// Optional clipping box appended before walking.
#[derive(Args, Debug, Default)]
struct BoxArgs {
    #[arg(long, allow_hyphen_values = true)]
    xmin: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    xmax: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    ymin: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    ymax: Option<f64>,
}

impl BoxArgs {
    fn bbox(&self) -> BoundingBox {
        BoundingBox {
            xmin: self.xmin,
            xmax: self.xmax,
            ymin: self.ymin,
            ymax: self.ymax,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Walk the constraint table and write the ordered vertices
    Vertices {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        bbox: BoxArgs,
    },
    /// Brute-force vertex enumeration (tolerates redundant constraints)
    Enumerate {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Sample the feasibility mask on a regular grid
    Raster {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// x range as `lo,hi`
        #[arg(long, allow_hyphen_values = true, value_parser = parse_pair)]
        xlim: Pair,
        /// y range as `lo,hi`
        #[arg(long, allow_hyphen_values = true, value_parser = parse_pair)]
        ylim: Pair,
        #[arg(long, default_value_t = DEFAULT_NX)]
        nx: usize,
        #[arg(long, default_value_t = DEFAULT_NY)]
        ny: usize,
    },
    /// Project a point onto the polygon with Frank-Wolfe
    Project {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Point to project, `x,y`
        #[arg(long, allow_hyphen_values = true, value_parser = parse_pair)]
        target: Pair,
        /// Start point, `x,y` (defaults to the first vertex)
        #[arg(long, allow_hyphen_values = true, value_parser = parse_pair)]
        start: Option<Pair>,
        #[arg(long, default_value_t = 100)]
        max_iter: usize,
        #[arg(long, default_value_t = 1e-6)]
        eps_stop: f64,
        #[command(flatten)]
        bbox: BoxArgs,
    },
    /// Write a random bounded constraint table
    Sample {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 8)]
        n: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn parse_pair(s: &str) -> Result<Pair, String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `a,b`, got `{s}`"))?;
    let a: f64 = a.trim().parse().map_err(|e| format!("`{a}`: {e}"))?;
    let b: f64 = b.trim().parse().map_err(|e| format!("`{b}`: {e}"))?;
    Ok((a, b))
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let tag = cmd.tag;
    match cmd.action {
        Action::Vertices { input, out, bbox } => vertices(&input, &out, &bbox, tag),
        Action::Enumerate { input, out } => enumerate(&input, &out, tag),
        Action::Raster {
            input,
            out,
            xlim,
            ylim,
            nx,
            ny,
        } => raster(&input, &out, xlim, ylim, (nx, ny), tag),
        Action::Project {
            input,
            out,
            target,
            start,
            max_iter,
            eps_stop,
            bbox,
        } => {
            let cfg = FwCfg {
                max_iter,
                eps_stop,
                ..FwCfg::default()
            };
            projection(&input, &out, &bbox, target, start, cfg, tag)
        }
        Action::Sample {
            out,
            n,
            seed,
            index,
        } => sample(&out, n, ReplayToken { seed, index }, tag),
        Action::Report => report(tag),
    }
}

#[derive(Serialize)]
struct VerticesOut {
    vertices: Vec<[f64; 2]>,
    walk: Vec<[f64; 2]>,
    visited: Vec<usize>,
    closed: bool,
    area: f64,
    perimeter: f64,
}

#[derive(Serialize)]
struct RasterOut {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// One row per y sample.
    mask: Vec<Vec<bool>>,
    feasible: usize,
}

#[derive(Serialize)]
struct ProjectOut {
    target: [f64; 2],
    x: [f64; 2],
    gap: f64,
    iterations: usize,
    converged: bool,
    history: Vec<[f64; 2]>,
}

fn xy(p: &Vec2<f64>) -> [f64; 2] {
    [p.x, p.y]
}

fn load(input: &Path, bbox: &BoxArgs) -> Result<Vec<Hs2>> {
    let hs = table::read_constraints(input)?;
    let bbox = bbox.bbox();
    if bbox.is_unset() {
        Ok(hs)
    } else {
        tracing::info!(?bbox, "bounding_box_appended");
        Ok(bbox.append_to(&hs))
    }
}

fn write_json<T: Serialize>(out: &Path, value: &T) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))
}

fn vertices(input: &Path, out: &Path, bbox: &BoxArgs, tag: Option<String>) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), tag = ?tag, "vertices");
    let hs = load(input, bbox)?;
    let poly = find_vertices(&hs)?;
    tracing::info!(
        constraints = hs.len(),
        vertices = poly.len(),
        closed = poly.is_closed(),
        "walk_done"
    );
    let doc = VerticesOut {
        vertices: poly.vertices().iter().map(xy).collect(),
        walk: poly.walk().iter().map(xy).collect(),
        visited: poly.visited().to_vec(),
        closed: poly.is_closed(),
        area: poly.signed_area(),
        perimeter: poly.perimeter(),
    };
    write_json(out, &doc)?;
    let params = serde_json::json!({
        "input": input,
        "bbox": [bbox.xmin, bbox.xmax, bbox.ymin, bbox.ymax],
    });
    write_sidecar(out, Payload::new("vertices", params).with_tag(tag))?;
    Ok(())
}

fn enumerate(input: &Path, out: &Path, tag: Option<String>) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), tag = ?tag, "enumerate");
    let hs = table::read_constraints(input)?;
    let verts = enumerate_vertices(&hs, GeomCfg::default())?;
    tracing::info!(constraints = hs.len(), vertices = verts.len(), "enumerate_done");
    let doc: Vec<[f64; 2]> = verts.iter().map(xy).collect();
    write_json(out, &doc)?;
    let params = serde_json::json!({ "input": input });
    write_sidecar(out, Payload::new("enumerate", params).with_tag(tag))?;
    Ok(())
}

fn raster(
    input: &Path,
    out: &Path,
    xlim: Pair,
    ylim: Pair,
    (nx, ny): (usize, usize),
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(input = %input.display(), nx, ny, tag = ?tag, "raster");
    let hs = table::read_constraints(input)?;
    let grid = feasibility_grid(&hs, xlim, ylim, nx, ny)?;
    let doc = RasterOut {
        mask: grid.mask.chunks(nx).map(|row| row.to_vec()).collect(),
        feasible: grid.count(),
        xs: grid.xs,
        ys: grid.ys,
    };
    tracing::info!(feasible = doc.feasible, total = nx * ny, "raster_done");
    write_json(out, &doc)?;
    let params = serde_json::json!({
        "input": input,
        "xlim": [xlim.0, xlim.1],
        "ylim": [ylim.0, ylim.1],
        "nx": nx,
        "ny": ny,
    });
    write_sidecar(out, Payload::new("raster", params).with_tag(tag))?;
    Ok(())
}

fn projection(
    input: &Path,
    out: &Path,
    bbox: &BoxArgs,
    target: Pair,
    start: Option<Pair>,
    cfg: FwCfg,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(input = %input.display(), ?target, ?start, tag = ?tag, "project");
    let hs = load(input, bbox)?;
    let target = Vec2::new(target.0, target.1);
    let x0 = match start {
        Some((x, y)) => Vec2::new(x, y),
        None => find_vertices(&hs)?.vertices()[0],
    };
    let res = project(&hs, target, x0, cfg)?;
    if !res.converged {
        tracing::warn!(gap = res.gap, iterations = res.iterations, "project_not_converged");
    }
    let doc = ProjectOut {
        target: xy(&target),
        x: xy(&res.x),
        gap: res.gap,
        iterations: res.iterations,
        converged: res.converged,
        history: res.history.iter().map(xy).collect(),
    };
    write_json(out, &doc)?;
    let params = serde_json::json!({
        "input": input,
        "target": doc.target,
        "start": [x0.x, x0.y],
        "max_iter": cfg.max_iter,
        "eps_stop": cfg.eps_stop,
    });
    write_sidecar(out, Payload::new("project", params).with_tag(tag))?;
    Ok(())
}

fn sample(out: &Path, n: usize, tok: ReplayToken, tag: Option<String>) -> Result<()> {
    tracing::info!(n, seed = tok.seed, index = tok.index, tag = ?tag, "sample");
    let cfg = TangentCfg {
        vertex_count: VertexCount::Fixed(n),
        ..TangentCfg::default()
    };
    let hs = draw_tangent_polygon(cfg, tok);
    table::write_constraints(out, &hs)?;
    let params = serde_json::json!({
        "n": hs.len(),
        "seed": tok.seed,
        "index": tok.index,
    });
    write_sidecar(out, Payload::new("sample", params).with_tag(tag))?;
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "polywalk_version": polywalk::VERSION,
        "tag": tag,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    const PENTAGON_CSV: &str = "a1,a2,b\n0,-1,0\n1,0,2\n0,1,1\n-1,0,0\n1,1,2.5\n";

    #[test]
    fn parse_pair_accepts_negative_values() {
        assert_eq!(parse_pair("-0.5,2.5").unwrap(), (-0.5, 2.5));
        assert_eq!(parse_pair(" 1 , -2 ").unwrap(), (1.0, -2.0));
        assert!(parse_pair("1;2").is_err());
        assert!(parse_pair("a,2").is_err());
    }

    #[test]
    fn vertices_writes_json_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("pentagon.csv");
        std::fs::write(&input, PENTAGON_CSV).unwrap();
        let out = dir.path().join("out").join("vertices.json");
        vertices(&input, &out, &BoxArgs::default(), None).unwrap();

        let doc: Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc["vertices"].as_array().unwrap().len(), 5);
        assert_eq!(doc["walk"].as_array().unwrap().len(), 6);
        assert_eq!(doc["closed"], true);
        assert!((doc["area"].as_f64().unwrap() - 1.875).abs() < 1e-9);
        assert!(dir.path().join("out").join("vertices.provenance.json").exists());
    }

    #[test]
    fn vertices_surfaces_walk_errors() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("slab.csv");
        std::fs::write(&input, "a1,a2,b\n0,-1,0\n0,1,1\n-1,0,0\n").unwrap();
        let out = dir.path().join("v.json");
        let err = vertices(&input, &out, &BoxArgs::default(), None).unwrap_err();
        assert!(err.to_string().contains("no next neighbor"), "{err}");
        assert!(!out.exists());

        let bbox = BoxArgs {
            xmax: Some(3.0),
            ..BoxArgs::default()
        };
        vertices(&input, &out, &bbox, None).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn project_and_raster_round_trip_through_files() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("pentagon.csv");
        std::fs::write(&input, PENTAGON_CSV).unwrap();

        let out = dir.path().join("p.json");
        let cfg = FwCfg::default();
        projection(&input, &out, &BoxArgs::default(), (3.0, 3.0), None, cfg, None).unwrap();
        let doc: Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc["converged"], true);
        let x = doc["x"].as_array().unwrap();
        // The foot (1.25, 1.25) on x + y = 2.5 misses that edge; the vertex (1.5, 1) wins.
        assert!((x[0].as_f64().unwrap() - 1.5).abs() < 1e-6);
        assert!((x[1].as_f64().unwrap() - 1.0).abs() < 1e-6);

        let out = dir.path().join("r.json");
        raster(&input, &out, (-0.5, 2.5), (-0.5, 1.5), (90, 80), None).unwrap();
        let doc: Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc["mask"].as_array().unwrap().len(), 80);
        assert_eq!(doc["mask"][0].as_array().unwrap().len(), 90);
        assert!(doc["feasible"].as_u64().unwrap() > 0);
    }

    #[test]
    fn enumerate_writes_hull_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("pentagon_loose.csv");
        // Pentagon plus a redundant x <= 5.
        std::fs::write(&input, format!("{PENTAGON_CSV}1,0,5\n")).unwrap();
        let out = dir.path().join("e.json");
        enumerate(&input, &out, Some("hull".into())).unwrap();

        let doc: Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        let verts = doc.as_array().unwrap();
        assert_eq!(verts.len(), 5);
        assert!(verts.iter().any(|v| {
            let (x, y) = (v[0].as_f64().unwrap(), v[1].as_f64().unwrap());
            (x - 1.5).abs() < 1e-9 && (y - 1.0).abs() < 1e-9
        }));
        let prov: Value = serde_json::from_slice(
            &std::fs::read(dir.path().join("e.provenance.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(prov["command"], "enumerate");
        assert_eq!(prov["tag"], "hull");
    }

    #[test]
    fn sampled_table_walks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.csv");
        sample(&path, 9, ReplayToken { seed: 1, index: 2 }, Some("t".into())).unwrap();
        let hs = table::read_constraints(&path).unwrap();
        assert_eq!(hs.len(), 9);
        assert_eq!(find_vertices(&hs).unwrap().len(), 9);
        assert!(dir.path().join("sample.provenance.json").exists());
    }
}
