use super::types::{CanvasGraph, Selection};

/// Clicks closer to a node edge than this still count as hits, so tiny
/// vertices stay selectable.
pub const MIN_HIT_RADIUS: f64 = 12.0;
/// World-space distance at which a click selects an edge line.
pub const EDGE_HIT_DISTANCE: f64 = 8.0;
/// Screen-space movement below which a drag is treated as a click.
pub const CLICK_SLOP: f64 = 3.0;

const FIT_MARGIN: f64 = 60.0;
const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 10.0;
const MAX_FIT_ZOOM: f64 = 1.5;

/// Pan/zoom transform from world (graph) to screen coordinates.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		ViewTransform { x: 0.0, y: 0.0, k: 1.0 }
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
	/// Set once the pointer travels beyond [`CLICK_SLOP`].
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Everything the render loop and the mouse handlers share.
pub struct CanvasState {
	pub graph: CanvasGraph,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub selection: Selection,
	pub width: f64,
	pub height: f64,
}

impl CanvasState {
	pub fn new(graph: CanvasGraph, width: f64, height: f64) -> Self {
		let mut state = CanvasState {
			graph,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			selection: Selection::None,
			width,
			height,
		};
		state.fit();
		state
	}

	/// Swap in a fresh graph without disturbing the user's pan/zoom.
	pub fn set_graph(&mut self, graph: CanvasGraph) {
		if self.drag.node.is_some_and(|idx| idx >= graph.nodes.len()) {
			self.drag = DragState::default();
		}
		self.graph = graph;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Center the view on the graph's bounding box. An empty graph centers
	/// the world origin region used for first-vertex placement.
	pub fn fit(&mut self) {
		if self.graph.nodes.is_empty() {
			self.transform = ViewTransform {
				x: self.width / 2.0 - 600.0,
				y: self.height / 2.0 - 400.0,
				k: 1.0,
			};
			return;
		}

		let mut min_x = f64::INFINITY;
		let mut min_y = f64::INFINITY;
		let mut max_x = f64::NEG_INFINITY;
		let mut max_y = f64::NEG_INFINITY;
		for node in &self.graph.nodes {
			min_x = min_x.min(node.x - node.radius);
			min_y = min_y.min(node.y - node.radius);
			max_x = max_x.max(node.x + node.radius);
			max_y = max_y.max(node.y + node.radius);
		}

		let bbox_w = (max_x - min_x).max(1.0);
		let bbox_h = (max_y - min_y).max(1.0);
		let k = ((self.width - FIT_MARGIN) / bbox_w)
			.min((self.height - FIT_MARGIN) / bbox_h)
			.clamp(MIN_ZOOM, MAX_FIT_ZOOM);

		let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - k * cx,
			y: self.height / 2.0 - k * cy,
			k,
		};
	}

	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Topmost node under a screen position, honoring each node's own radius.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.graph
			.nodes
			.iter()
			.enumerate()
			.rev()
			.find(|(_, node)| {
				let (dx, dy) = (node.x - gx, node.y - gy);
				(dx * dx + dy * dy).sqrt() <= node.radius.max(MIN_HIT_RADIUS)
			})
			.map(|(idx, _)| idx)
	}

	/// Edge line under a screen position, topmost (last drawn) first. Nodes
	/// win over edges; callers test [`Self::node_at_position`] first.
	pub fn edge_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.graph.edges.iter().enumerate().rev().find_map(|(idx, edge)| {
			let source = self.node_by_id(&edge.source)?;
			let target = self.node_by_id(&edge.target)?;
			let distance = if edge.source == edge.target {
				loop_distance(source.x, source.y, source.radius, gx, gy)
			} else {
				segment_distance(source.x, source.y, target.x, target.y, gx, gy)
			};
			(distance <= EDGE_HIT_DISTANCE).then_some(idx)
		})
	}

	pub fn node_by_id(&self, id: &str) -> Option<&super::types::CanvasNode> {
		self.graph.nodes.iter().find(|n| n.id == id)
	}

	pub fn move_node(&mut self, idx: usize, x: f64, y: f64) {
		if let Some(node) = self.graph.nodes.get_mut(idx) {
			node.x = x;
			node.y = y;
		}
	}
}

/// Distance from a point to the line segment (x1,y1)-(x2,y2).
fn segment_distance(x1: f64, y1: f64, x2: f64, y2: f64, px: f64, py: f64) -> f64 {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let len_sq = dx * dx + dy * dy;
	let t = if len_sq == 0.0 {
		0.0
	} else {
		(((px - x1) * dx + (py - y1) * dy) / len_sq).clamp(0.0, 1.0)
	};
	let (cx, cy) = (x1 + t * dx, y1 + t * dy);
	((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

/// Distance to the self-loop circle drawn at a node's top-right corner;
/// keep in sync with `render::loop_geometry`.
fn loop_distance(x: f64, y: f64, radius: f64, px: f64, py: f64) -> f64 {
	let (lx, ly, lr) = super::render::loop_geometry(x, y, radius);
	(((px - lx).powi(2) + (py - ly).powi(2)).sqrt() - lr).abs()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::super::types::{CanvasEdge, CanvasNode};
	use super::*;

	fn node(id: &str, x: f64, y: f64, radius: f64) -> CanvasNode {
		CanvasNode {
			id: id.into(),
			label: id.into(),
			x,
			y,
			radius,
		}
	}

	fn graph() -> CanvasGraph {
		CanvasGraph {
			nodes: vec![node("a", 0.0, 0.0, 30.0), node("b", 200.0, 0.0, 20.0)],
			edges: vec![CanvasEdge {
				id: "ab".into(),
				label: "knows".into(),
				source: "a".into(),
				target: "b".into(),
				multi_edge: false,
			}],
		}
	}

	/// Identity transform makes screen coordinates equal world coordinates.
	fn flat_state() -> CanvasState {
		let mut state = CanvasState::new(graph(), 800.0, 600.0);
		state.transform = ViewTransform::default();
		state
	}

	#[test]
	fn node_hit_testing_uses_each_radius() {
		let state = flat_state();
		assert_eq!(state.node_at_position(0.0, 29.0), Some(0));
		assert_eq!(state.node_at_position(0.0, 31.0), None);
		// "b" has radius 20: a click 25 away misses it.
		assert_eq!(state.node_at_position(200.0, 25.0), None);
		assert_eq!(state.node_at_position(200.0, 19.0), Some(1));
	}

	#[test]
	fn tiny_nodes_keep_a_minimum_hit_area() {
		let mut state = flat_state();
		state.graph.nodes[0].radius = 2.0;
		assert_eq!(state.node_at_position(0.0, 10.0), Some(0));
	}

	#[test]
	fn overlapping_nodes_select_the_topmost() {
		let mut state = flat_state();
		state.graph.nodes[1].x = 10.0;
		assert_eq!(state.node_at_position(5.0, 0.0), Some(1));
	}

	#[test]
	fn edge_hit_testing_follows_the_segment() {
		let state = flat_state();
		assert_eq!(state.edge_at_position(100.0, 5.0), Some(0));
		assert_eq!(state.edge_at_position(100.0, 50.0), None);
		// Beyond either endpoint the segment does not extend.
		assert_eq!(state.edge_at_position(300.0, 0.0), None);
	}

	#[test]
	fn overlapping_edges_select_the_topmost() {
		let mut state = flat_state();
		state.graph.edges.push(CanvasEdge {
			id: "ab2".into(),
			label: "likes".into(),
			source: "a".into(),
			target: "b".into(),
			multi_edge: true,
		});
		assert_eq!(state.edge_at_position(100.0, 5.0), Some(1));
	}

	#[test]
	fn zoom_keeps_the_anchor_point_fixed() {
		let mut state = flat_state();
		let before = state.screen_to_graph(100.0, 5.0);
		state.zoom_at(100.0, 5.0, 1.3);
		let after = state.screen_to_graph(100.0, 5.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn fit_brings_every_node_into_view() {
		let mut state = CanvasState::new(graph(), 800.0, 600.0);
		state.graph.nodes.push(node("c", 5000.0, -3000.0, 30.0));
		state.fit();
		for node in &state.graph.nodes {
			let sx = node.x * state.transform.k + state.transform.x;
			let sy = node.y * state.transform.k + state.transform.y;
			assert!((0.0..=800.0).contains(&sx), "{} x off-screen: {sx}", node.id);
			assert!((0.0..=600.0).contains(&sy), "{} y off-screen: {sy}", node.id);
		}
	}

	#[test]
	fn set_graph_preserves_the_transform() {
		let mut state = CanvasState::new(graph(), 800.0, 600.0);
		state.transform = ViewTransform { x: 33.0, y: -7.0, k: 0.5 };
		state.set_graph(CanvasGraph::default());
		assert_eq!(state.transform.x, 33.0);
		assert_eq!(state.transform.y, -7.0);
		assert_eq!(state.transform.k, 0.5);
	}

	#[test]
	fn set_graph_drops_a_stale_drag() {
		let mut state = CanvasState::new(graph(), 800.0, 600.0);
		state.drag.active = true;
		state.drag.node = Some(1);
		state.set_graph(CanvasGraph {
			nodes: vec![node("a", 0.0, 0.0, 30.0)],
			edges: vec![],
		});
		assert!(!state.drag.active);
		assert_eq!(state.drag.node, None);
	}
}
