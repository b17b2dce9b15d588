//! Status and controls text drawn over every frame.

use super::{DrawList, FrameContext, VisualizationMode};
use crate::params::RenderConfig;

const MARGIN: i32 = 20;
const CONTROLS: [&str; 4] = [
    "Controls:",
    "SPACE - Start/Stop Audio",
    "1-5 - Change Visualization Mode",
    "ESC - Quit",
];

/// Title, mode, recording status, and the controls legend
pub fn draw_overlay(
    ctx: &FrameContext,
    config: &RenderConfig,
    mode: VisualizationMode,
    recording: bool,
    out: &mut DrawList,
) {
    let palette = &ctx.palette;
    let (title_px, body_px) = (config.title_font_px, config.body_font_px);

    out.text(MARGIN, 20, title_px, "Audio Visualizer", palette.primary);
    out.text(
        MARGIN,
        60,
        body_px,
        format!("Mode: {}", mode.label()),
        palette.text,
    );
    out.text(MARGIN, 90, body_px, status_line(recording), status_color(ctx, recording));

    let top = ctx.height as i32 - 120;
    for (i, line) in CONTROLS.iter().enumerate() {
        let color = if i == 0 {
            palette.primary
        } else {
            palette.text_muted
        };
        out.text(MARGIN, top + i as i32 * 25, body_px, *line, color);
    }
}

/// "Status: Recording" / "Status: Not Recording"
pub fn status_line(recording: bool) -> &'static str {
    if recording {
        "Status: Recording"
    } else {
        "Status: Not Recording"
    }
}

fn status_color(ctx: &FrameContext, recording: bool) -> crate::color::Rgba {
    if recording {
        ctx.palette.status_on
    } else {
        ctx.palette.status_off
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::modes::test_support::ctx;
    use crate::render::Primitive;

    fn texts(out: &DrawList) -> Vec<String> {
        out.primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_overlay_reports_mode_and_status() {
        let mut out = DrawList::new();
        draw_overlay(
            &ctx(0),
            &RenderConfig::default(),
            VisualizationMode::Spiral,
            true,
            &mut out,
        );

        let texts = texts(&out);
        assert_eq!(texts.len(), 7);
        assert!(texts.contains(&"Mode: Spiral".to_string()));
        assert!(texts.contains(&"Status: Recording".to_string()));
        assert!(texts.contains(&"ESC - Quit".to_string()));
    }

    #[test]
    fn test_controls_anchor_to_bottom() {
        let mut out = DrawList::new();
        draw_overlay(
            &ctx(0),
            &RenderConfig::default(),
            VisualizationMode::FrequencyBars,
            false,
            &mut out,
        );

        match out.primitives().last() {
            Some(Primitive::Text { y, text, .. }) => {
                assert_eq!(text, "ESC - Quit");
                assert_eq!(*y, 800 - 120 + 3 * 25);
            }
            other => panic!("unexpected primitive {:?}", other),
        }
    }
}
