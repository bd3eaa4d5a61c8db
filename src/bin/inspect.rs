//! splat-inspect: Load a splat PLY file and report what the renderer would see
//!
//! Usage:
//!   inspect <file.ply> [--max-points N]

use splatview::load_splats;
use std::path::PathBuf;
use std::process::exit;

fn main() {
    env_logger::init();
    println!("splat-inspect v{}", splatview::VERSION);

    let mut args = std::env::args().skip(1);
    let mut path: Option<PathBuf> = None;
    let mut max_points: Option<usize> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--max-points" => {
                let value = args.next().expect("Missing --max-points argument");
                max_points = Some(value.parse().expect("Invalid --max-points value"));
            }
            other => path = Some(PathBuf::from(other)),
        }
    }

    let Some(path) = path else {
        eprintln!("Usage: inspect <file.ply> [--max-points N]");
        exit(2);
    };

    let cloud = match load_splats(&path, max_points) {
        Ok(cloud) => cloud,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", path.display());
            exit(1);
        }
    };

    println!("Records:  {}", cloud.len());
    println!("Bytes:    {}", cloud.as_bytes().len());

    if cloud.is_empty() {
        return;
    }

    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];
    for record in cloud.as_slice() {
        for axis in 0..3 {
            min[axis] = min[axis].min(record.position[axis]);
            max[axis] = max[axis].max(record.position[axis]);
        }
    }
    println!(
        "Bounds:   [{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
        min[0], min[1], min[2], max[0], max[1], max[2]
    );
}
