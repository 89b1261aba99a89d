use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::CanvasState;
use super::types::{CanvasEdge, CanvasNode, Selection};

const BACKGROUND: &str = "#15151f";
const NODE_FILL: &str = "#7358FF";
const STROKE: &str = "rgba(255, 255, 255, 0.85)";
const STROKE_SELECTED: &str = "#75FA8D";
const LABEL_COLOR: &str = "white";
const LABEL_BACKGROUND: &str = "rgba(0, 0, 0, 0.85)";

/// Arrowhead length in world units, so arrows scale with the graph like the
/// vertices do.
const ARROW_SIZE: f64 = 14.0;

pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

/// Geometry of the self-loop circle drawn at a node's top-right corner:
/// `(center_x, center_y, radius)`.
pub(super) fn loop_geometry(x: f64, y: f64, radius: f64) -> (f64, f64, f64) {
	(x + radius * 0.9, y - radius * 0.9, radius * 0.6)
}

fn draw_edges(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	for edge in &state.graph.edges {
		let (Some(source), Some(target)) =
			(state.node_by_id(&edge.source), state.node_by_id(&edge.target))
		else {
			continue;
		};
		let selected = state.selection == Selection::Edge(edge.id.clone());
		let color = if selected { STROKE_SELECTED } else { STROKE };
		ctx.set_stroke_style_str(color);
		ctx.set_fill_style_str(color);
		ctx.set_line_width(if selected { 2.5 / k } else { 1.5 / k });

		if edge.source == edge.target {
			draw_self_loop(ctx, source, edge, k);
			continue;
		}

		let (dx, dy) = (target.x - source.x, target.y - source.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		let (x1, y1) = (source.x + ux * source.radius, source.y + uy * source.radius);
		let (tip_x, tip_y) = (target.x - ux * target.radius, target.y - uy * target.radius);

		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		ctx.stroke();

		draw_arrowhead(ctx, tip_x, tip_y, ux, uy, edge.multi_edge);
		draw_label(
			ctx,
			&edge.label,
			(source.x + target.x) / 2.0,
			(source.y + target.y) / 2.0,
			k,
		);
	}
}

fn draw_self_loop(ctx: &CanvasRenderingContext2d, node: &CanvasNode, edge: &CanvasEdge, k: f64) {
	let (lx, ly, lr) = loop_geometry(node.x, node.y, node.radius);
	ctx.begin_path();
	let _ = ctx.arc(lx, ly, lr, 0.0, 2.0 * PI);
	ctx.stroke();
	draw_label(ctx, &edge.label, lx, ly - lr - 8.0, k);
}

/// Multi-edges get a diamond head, plain edges a triangle (the multiplicity
/// cue the editor relies on).
fn draw_arrowhead(
	ctx: &CanvasRenderingContext2d,
	tip_x: f64,
	tip_y: f64,
	ux: f64,
	uy: f64,
	multi_edge: bool,
) {
	let (px, py) = (-uy * ARROW_SIZE * 0.4, ux * ARROW_SIZE * 0.4);
	ctx.begin_path();
	if multi_edge {
		let (mid_x, mid_y) = (tip_x - ux * ARROW_SIZE * 0.5, tip_y - uy * ARROW_SIZE * 0.5);
		let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(mid_x + px, mid_y + py);
		ctx.line_to(back_x, back_y);
		ctx.line_to(mid_x - px, mid_y - py);
	} else {
		let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
	}
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	for node in &state.graph.nodes {
		let selected = state.selection == Selection::Vertex(node.id.clone());

		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(NODE_FILL);
		ctx.fill();
		ctx.set_stroke_style_str(if selected { STROKE_SELECTED } else { STROKE });
		ctx.set_line_width(3.0 / k.max(0.5));
		ctx.stroke();

		draw_label(ctx, &node.label, node.x, node.y, k);
	}
}

/// Label with a dark backing box so it stays readable over lines and fills.
fn draw_label(ctx: &CanvasRenderingContext2d, text: &str, x: f64, y: f64, k: f64) {
	if text.is_empty() {
		return;
	}
	let font_size = 12.0 / k.max(0.5);
	ctx.set_font(&format!("{font_size}px sans-serif"));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	if let Ok(metrics) = ctx.measure_text(text) {
		let (w, h) = (metrics.width(), font_size);
		ctx.set_fill_style_str(LABEL_BACKGROUND);
		ctx.fill_rect(x - w / 2.0 - 2.0, y - h / 2.0 - 1.0, w + 4.0, h + 2.0);
	}
	ctx.set_fill_style_str(LABEL_COLOR);
	let _ = ctx.fill_text(text, x, y);
}
