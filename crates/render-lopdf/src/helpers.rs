use crate::fonts::FontResources;
use labelsheet_layout::FitResult;
use labelsheet_render_core::utils::font_resource_name;
use labelsheet_style::FontWeight;
use lopdf::content::Operation;
use lopdf::{Object, StringFormat};

/// Content stream operations that draw `block` with its top-left corner at
/// (`x`, `top`).
///
/// Line `i` sits on the baseline `top - font_size - i * leading`. Each run is
/// positioned absolutely with `Tm`, and the font is only re-selected when the
/// weight changes. Shown strings are encoded for the document's fonts.
pub fn block_operations(
    x: f32,
    top: f32,
    block: &FitResult,
    fonts: &mut FontResources,
) -> Vec<Operation> {
    let font_size = block.font_size();
    let leading = block.style.leading;
    let mut ops = Vec::new();
    let mut current_weight: Option<FontWeight> = None;

    for (i, line) in block.lines.iter().enumerate() {
        let baseline = top - font_size - i as f32 * leading;
        for run in &line.runs {
            if current_weight.is_none() {
                ops.push(Operation::new("BT", vec![]));
            }
            if current_weight != Some(run.weight) {
                ops.push(Operation::new(
                    "Tf",
                    vec![font_resource_name(run.weight).into(), font_size.into()],
                ));
                current_weight = Some(run.weight);
            }
            ops.push(Operation::new(
                "Tm",
                vec![
                    1.0.into(),
                    0.0.into(),
                    0.0.into(),
                    1.0.into(),
                    (x + run.x).into(),
                    baseline.into(),
                ],
            ));
            let shown = fonts.encode(&run.text, run.weight);
            ops.push(Operation::new(
                "Tj",
                vec![Object::String(shown, StringFormat::Hexadecimal)],
            ));
        }
    }

    if current_weight.is_some() {
        ops.push(Operation::new("ET", vec![]));
    }
    ops
}
