//! Structured text layer descriptions for failure diagnostics.

use std::fmt::Write as _;

use layer_engine::Layer;

/// A plain-text summary of a layer: schema, extent, and one line per
/// feature (FID, geometry kind, vertex count, extent, flags, attributes).
pub fn layer_report(layer: &Layer) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "layer '{}' ({})", layer.name, layer.id);

    let schema: Vec<String> = layer
        .schema()
        .iter()
        .map(|f| format!("{} ({:?})", f.name, f.kind))
        .collect();
    let _ = writeln!(out, "  schema: [{}]", schema.join(", "));

    match layer.extent() {
        Some(e) => {
            let _ = writeln!(
                out,
                "  extent: ({:.4}, {:.4})-({:.4}, {:.4})",
                e.min_x, e.min_y, e.max_x, e.max_y,
            );
        }
        None => {
            let _ = writeln!(out, "  extent: none");
        }
    }
    let _ = writeln!(
        out,
        "  features: {} total, {} live",
        layer.len(),
        layer.live_len()
    );

    for feature in layer.iter() {
        let extent = match feature.extent {
            Some(e) => format!("({:.4}, {:.4})-({:.4}, {:.4})", e.min_x, e.min_y, e.max_x, e.max_y),
            None => "none".to_string(),
        };
        let mut flags = Vec::new();
        if feature.deleted {
            flags.push("deleted");
        }
        if feature.selected {
            flags.push("selected");
        }
        let values =
            serde_json::to_string(&feature.values).unwrap_or_else(|_| "<unserializable>".into());
        let _ = writeln!(
            out,
            "    fid {}: {:?}, {} pts, {} [{}] {}",
            feature.fid,
            feature.geometry.kind(),
            feature.geometry.point_count(),
            extent,
            flags.join(","),
            values,
        );
    }
    out
}
