use crate::models::schema::Graph;

/// What the user currently has selected on the canvas.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
	#[default]
	None,
	Vertex(String),
	Edge(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CanvasNode {
	pub id: String,
	pub label: String,
	pub x: f64,
	pub y: f64,
	pub radius: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CanvasEdge {
	pub id: String,
	pub label: String,
	pub source: String,
	pub target: String,
	pub multi_edge: bool,
}

/// View model the canvas renders; positions are world coordinates as stored
/// by the backend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanvasGraph {
	pub nodes: Vec<CanvasNode>,
	pub edges: Vec<CanvasEdge>,
}

impl From<&Graph> for CanvasGraph {
	fn from(graph: &Graph) -> Self {
		CanvasGraph {
			nodes: graph
				.vertices
				.iter()
				.map(|vertex| CanvasNode {
					id: vertex.id.clone(),
					label: vertex.label.clone(),
					x: vertex.position_x,
					y: vertex.position_y,
					radius: vertex.radius,
				})
				.collect(),
			edges: graph
				.edges
				.iter()
				.map(|edge| CanvasEdge {
					id: edge.id.clone(),
					label: edge.label.clone(),
					source: edge.source.clone(),
					target: edge.target.clone(),
					multi_edge: edge.multi_edge,
				})
				.collect(),
		}
	}
}
