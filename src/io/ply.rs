//! PLY parser for Gaussian splat point clouds.
//!
//! Splat files store one `vertex` element per splat with named scalar
//! properties. This loader reads the fields the renderer needs:
//! - `x, y, z`: splat center
//! - `f_dc_0..2`: spherical-harmonics DC coefficients per channel
//! - `opacity`: opacity logit
//! - `scale_0..2`: log-space scale
//! - `rot_0..3`: rotation quaternion in (r, x, y, z) order
//!
//! Both `ascii 1.0` and `binary_little_endian 1.0` bodies are supported.
//! Extra scalar properties are skipped by stride; any element declared
//! after `vertex` is ignored entirely.

use crate::core::covariance::compute_cov3d_batch;
use crate::core::math::{sigmoid, SH_C0};
use crate::core::{SplatCloud, SplatRecord};
use byteorder::{LittleEndian, ReadBytesExt};
use nalgebra::Vector3;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a splat dataset.
#[derive(Debug, Error)]
pub enum DatasetLoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid PLY format: {0}")]
    InvalidFormat(String),

    #[error("Missing required vertex property: {0}")]
    MissingField(String),

    #[error("Unsupported PLY feature: {0}")]
    Unsupported(String),
}

/// Vertex properties every splat file must declare.
const REQUIRED_FIELDS: [&str; 14] = [
    "x", "y", "z", "f_dc_0", "f_dc_1", "f_dc_2", "opacity", "scale_0", "scale_1", "scale_2",
    "rot_0", "rot_1", "rot_2", "rot_3",
];

/// PLY body encodings this loader understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlyFormat {
    Ascii,
    BinaryLittleEndian,
}

/// Scalar property types from the PLY 1.0 specification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScalarType {
    Char,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Float,
    Double,
}

impl ScalarType {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "char" | "int8" => Self::Char,
            "uchar" | "uint8" => Self::UChar,
            "short" | "int16" => Self::Short,
            "ushort" | "uint16" => Self::UShort,
            "int" | "int32" => Self::Int,
            "uint" | "uint32" => Self::UInt,
            "float" | "float32" => Self::Float,
            "double" | "float64" => Self::Double,
            _ => return None,
        })
    }

    /// Read one binary little-endian value, widened to f32.
    fn read_le(self, reader: &mut impl std::io::Read) -> std::io::Result<f32> {
        Ok(match self {
            Self::Char => reader.read_i8()? as f32,
            Self::UChar => reader.read_u8()? as f32,
            Self::Short => reader.read_i16::<LittleEndian>()? as f32,
            Self::UShort => reader.read_u16::<LittleEndian>()? as f32,
            Self::Int => reader.read_i32::<LittleEndian>()? as f32,
            Self::UInt => reader.read_u32::<LittleEndian>()? as f32,
            Self::Float => reader.read_f32::<LittleEndian>()?,
            Self::Double => reader.read_f64::<LittleEndian>()? as f32,
        })
    }
}

/// Parsed PLY header: body encoding plus the vertex element's layout.
#[derive(Debug)]
struct PlyHeader {
    format: PlyFormat,
    vertex_count: usize,
    /// (name, type) per declared vertex property, in file order.
    properties: Vec<(String, ScalarType)>,
}

/// Parse the header, leaving the reader positioned at the first vertex.
fn parse_header(reader: &mut impl BufRead) -> Result<PlyHeader, DatasetLoadError> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    if line.trim_end() != "ply" {
        return Err(DatasetLoadError::InvalidFormat(
            "missing 'ply' magic line".into(),
        ));
    }

    let mut format = None;
    let mut vertex_count = None;
    let mut properties = Vec::new();
    // Set once a non-vertex element is declared; its properties are ignored.
    let mut in_vertex_element = false;

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(DatasetLoadError::InvalidFormat(
                "header ended before end_header".into(),
            ));
        }
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("comment") | Some("obj_info") | None => {}
            Some("end_header") => break,
            Some("format") => match tokens.next() {
                Some("ascii") => format = Some(PlyFormat::Ascii),
                Some("binary_little_endian") => format = Some(PlyFormat::BinaryLittleEndian),
                Some(other) => {
                    return Err(DatasetLoadError::Unsupported(format!(
                        "PLY format '{other}'"
                    )))
                }
                None => {
                    return Err(DatasetLoadError::InvalidFormat(
                        "format line without encoding".into(),
                    ))
                }
            },
            Some("element") => {
                let name = tokens.next().unwrap_or_default();
                let count = tokens
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| {
                        DatasetLoadError::InvalidFormat(format!(
                            "element '{name}' without a count"
                        ))
                    })?;
                if name == "vertex" {
                    if vertex_count.is_some() {
                        return Err(DatasetLoadError::InvalidFormat(
                            "duplicate vertex element".into(),
                        ));
                    }
                    vertex_count = Some(count);
                    in_vertex_element = true;
                } else {
                    if vertex_count.is_none() {
                        // Skipping an unknown leading element would need its
                        // full layout; splat files always lead with vertex.
                        return Err(DatasetLoadError::Unsupported(format!(
                            "element '{name}' declared before vertex"
                        )));
                    }
                    in_vertex_element = false;
                }
            }
            Some("property") => {
                if !in_vertex_element {
                    continue;
                }
                let type_name = tokens.next().unwrap_or_default();
                if type_name == "list" {
                    return Err(DatasetLoadError::Unsupported(
                        "list property on vertex element".into(),
                    ));
                }
                let scalar = ScalarType::parse(type_name).ok_or_else(|| {
                    DatasetLoadError::InvalidFormat(format!(
                        "unknown property type '{type_name}'"
                    ))
                })?;
                let name = tokens.next().ok_or_else(|| {
                    DatasetLoadError::InvalidFormat("property without a name".into())
                })?;
                properties.push((name.to_string(), scalar));
            }
            Some(other) => {
                return Err(DatasetLoadError::InvalidFormat(format!(
                    "unexpected header keyword '{other}'"
                )))
            }
        }
    }

    Ok(PlyHeader {
        format: format
            .ok_or_else(|| DatasetLoadError::InvalidFormat("missing format line".into()))?,
        vertex_count: vertex_count
            .ok_or_else(|| DatasetLoadError::InvalidFormat("missing vertex element".into()))?,
        properties,
    })
}

/// Indices of the required fields within the vertex property list.
fn resolve_fields(header: &PlyHeader) -> Result<[usize; 14], DatasetLoadError> {
    let mut indices = [0usize; 14];
    for (slot, field) in REQUIRED_FIELDS.iter().enumerate() {
        indices[slot] = header
            .properties
            .iter()
            .position(|(name, _)| name == field)
            .ok_or_else(|| DatasetLoadError::MissingField((*field).to_string()))?;
    }
    Ok(indices)
}

/// Load a splat cloud from a PLY file.
///
/// `max_points` truncates the dataset to at most that many leading points;
/// `None` loads everything. Fails without producing a partial cloud when the
/// file is unreadable, malformed, or missing a required property. Numeric
/// values are not range-checked; NaN/Inf flow through to the records.
pub fn load_splats(
    path: &Path,
    max_points: Option<usize>,
) -> Result<SplatCloud, DatasetLoadError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let header = parse_header(&mut reader)?;
    let fields = resolve_fields(&header)?;

    let count = match max_points {
        Some(max) => header.vertex_count.min(max),
        None => header.vertex_count,
    };
    log::info!(
        "loading {count} of {} splats from {}",
        header.vertex_count,
        path.display()
    );

    // Read every declared property per vertex; pick out the required ones.
    let mut rows = Vec::with_capacity(count);
    let mut row = vec![0f32; header.properties.len()];
    match header.format {
        PlyFormat::Ascii => {
            let mut line = String::new();
            for index in 0..count {
                line.clear();
                if reader.read_line(&mut line)? == 0 {
                    return Err(DatasetLoadError::InvalidFormat(format!(
                        "vertex data ended at point {index} of {count}"
                    )));
                }
                let mut tokens = line.split_whitespace();
                for (slot, value) in row.iter_mut().enumerate() {
                    let token = tokens.next().ok_or_else(|| {
                        DatasetLoadError::InvalidFormat(format!(
                            "vertex {index} has fewer than {} values",
                            slot + 1
                        ))
                    })?;
                    *value = token.parse::<f32>().map_err(|_| {
                        DatasetLoadError::InvalidFormat(format!(
                            "vertex {index}: cannot parse '{token}' as a number"
                        ))
                    })?;
                }
                rows.push(extract_fields(&row, &fields));
            }
        }
        PlyFormat::BinaryLittleEndian => {
            for _ in 0..count {
                for (value, (_, scalar)) in row.iter_mut().zip(&header.properties) {
                    *value = scalar.read_le(&mut reader)?;
                }
                rows.push(extract_fields(&row, &fields));
            }
        }
    }

    Ok(assemble_records(&rows))
}

/// The required values of one vertex, in `REQUIRED_FIELDS` order.
fn extract_fields(row: &[f32], fields: &[usize; 14]) -> [f32; 14] {
    let mut out = [0f32; 14];
    for (value, index) in out.iter_mut().zip(fields) {
        *value = row[*index];
    }
    out
}

/// Derive colors and covariances, then pack the flat record table.
fn assemble_records(rows: &[[f32; 14]]) -> SplatCloud {
    let scales: Vec<Vector3<f32>> = rows
        .iter()
        .map(|v| Vector3::new(v[7].exp(), v[8].exp(), v[9].exp()))
        .collect();
    let rotations: Vec<[f32; 4]> = rows.iter().map(|v| [v[10], v[11], v[12], v[13]]).collect();

    let (cov_a, cov_b) = compute_cov3d_batch(&scales, &rotations);

    let records = rows
        .iter()
        .zip(cov_a)
        .zip(cov_b)
        .map(|((v, cov_a), cov_b)| SplatRecord {
            position: [v[0], v[1], v[2]],
            color: [
                0.5 + SH_C0 * v[3],
                0.5 + SH_C0 * v[4],
                0.5 + SH_C0 * v[5],
                sigmoid(v[6]),
            ],
            cov_a,
            cov_b,
        })
        .collect();

    SplatCloud::from_records(records)
}
