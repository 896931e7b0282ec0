use std::collections::HashMap;
use std::f64::consts::PI;

use log::debug;

use super::types::{GalaxyData, GalaxyLink};

/// Tuning for the force simulation.
#[derive(Clone, Debug)]
pub struct LayoutParams {
	/// Radius of the circle nodes are seeded on.
	pub seed_radius: f64,
	pub iterations: usize,
	/// Inverse-square repulsion constant between every pair of nodes.
	pub repulsion: f64,
	/// Linear spring constant along links.
	pub attraction: f64,
	pub node_radius: f64,
}

impl Default for LayoutParams {
	fn default() -> Self {
		Self {
			seed_radius: 150.0,
			iterations: 100,
			repulsion: 3000.0,
			attraction: 0.01,
			node_radius: 8.0,
		}
	}
}

#[derive(Clone, Debug)]
pub struct SimNode {
	pub id: String,
	pub name: String,
	pub category: String,
	pub x: f64,
	pub y: f64,
	/// Displacement accumulated during the current iteration only.
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
}

/// Repulsion + spring layout, run to completion on every `set_data`.
#[derive(Clone, Debug, Default)]
pub struct ForceLayout {
	params: LayoutParams,
	nodes: Vec<SimNode>,
	links: Vec<GalaxyLink>,
	edges: Vec<(usize, usize)>,
}

impl ForceLayout {
	pub fn new(params: LayoutParams) -> Self {
		Self {
			params,
			..Self::default()
		}
	}

	/// Seed nodes on a circle around the surface centre and lay them out.
	pub fn set_data(&mut self, data: &GalaxyData, width: f64, height: f64) {
		let count = data.nodes.len() as f64;
		let (cx, cy) = (width / 2.0, height / 2.0);

		self.nodes = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let angle = (i as f64) * 2.0 * PI / count;
				SimNode {
					id: node.id.clone(),
					name: node.name.clone(),
					category: node.category.clone(),
					x: cx + self.params.seed_radius * angle.cos(),
					y: cy + self.params.seed_radius * angle.sin(),
					vx: 0.0,
					vy: 0.0,
					radius: self.params.node_radius,
				}
			})
			.collect();

		let mut id_to_idx = HashMap::with_capacity(self.nodes.len());
		for (i, node) in self.nodes.iter().enumerate() {
			id_to_idx.entry(node.id.as_str()).or_insert(i);
		}
		// Links with a missing endpoint are kept but never resolved.
		self.edges = data
			.links
			.iter()
			.filter_map(|link| {
				match (id_to_idx.get(link.source.as_str()), id_to_idx.get(link.target.as_str())) {
					(Some(&src), Some(&tgt)) => Some((src, tgt)),
					_ => None,
				}
			})
			.collect();
		self.links = data.links.clone();

		self.simulate();
		debug!(
			"Laid out {} nodes, {} of {} links resolved",
			self.nodes.len(),
			self.edges.len(),
			self.links.len()
		);
	}

	pub fn simulate(&mut self) {
		for _ in 0..self.params.iterations {
			self.step();
		}
	}

	/// One iteration: reset, repel all pairs, pull along links, displace.
	pub fn step(&mut self) {
		for node in &mut self.nodes {
			node.vx = 0.0;
			node.vy = 0.0;
		}

		let n = self.nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let (ux, uy, dist) = self.direction(i, j);
				let force = self.params.repulsion / (dist * dist);
				self.nodes[i].vx -= ux * force;
				self.nodes[i].vy -= uy * force;
				self.nodes[j].vx += ux * force;
				self.nodes[j].vy += uy * force;
			}
		}

		for k in 0..self.edges.len() {
			let (src, tgt) = self.edges[k];
			let (ux, uy, dist) = self.direction(src, tgt);
			let force = dist * self.params.attraction;
			self.nodes[src].vx += ux * force;
			self.nodes[src].vy += uy * force;
			self.nodes[tgt].vx -= ux * force;
			self.nodes[tgt].vy -= uy * force;
		}

		for node in &mut self.nodes {
			node.x += node.vx;
			node.y += node.vy;
		}
	}

	/// Unit vector from `a` to `b` and their distance (0 becomes 1).
	fn direction(&self, a: usize, b: usize) -> (f64, f64, f64) {
		let (dx, dy) = (
			self.nodes[b].x - self.nodes[a].x,
			self.nodes[b].y - self.nodes[a].y,
		);
		let mut dist = (dx * dx + dy * dy).sqrt();
		if dist == 0.0 {
			dist = 1.0;
		}
		(dx / dist, dy / dist, dist)
	}

	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	pub fn links(&self) -> &[GalaxyLink] {
		&self.links
	}

	pub fn node(&self, id: &str) -> Option<&SimNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Links whose endpoints both exist, as node pairs.
	pub fn resolved_links(&self) -> impl Iterator<Item = (&SimNode, &SimNode)> {
		self.edges
			.iter()
			.map(|&(src, tgt)| (&self.nodes[src], &self.nodes[tgt]))
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::super::types::GalaxyNode;
	use super::*;

	fn data(n: usize, links: &[(&str, &str)]) -> GalaxyData {
		GalaxyData {
			nodes: (0..n)
				.map(|i| GalaxyNode {
					id: i.to_string(),
					name: format!("Skill {}", i),
					category: "Science".into(),
				})
				.collect(),
			links: links
				.iter()
				.map(|(s, t)| GalaxyLink {
					source: s.to_string(),
					target: t.to_string(),
				})
				.collect(),
		}
	}

	fn distance(layout: &ForceLayout, a: &str, b: &str) -> f64 {
		let (a, b) = (layout.node(a).unwrap(), layout.node(b).unwrap());
		((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
	}

	fn laid_out(n: usize, links: &[(&str, &str)]) -> ForceLayout {
		let mut layout = ForceLayout::new(LayoutParams::default());
		layout.set_data(&data(n, links), 800.0, 600.0);
		layout
	}

	#[test]
	fn seeds_nodes_on_a_circle() {
		let mut layout = ForceLayout::new(LayoutParams {
			iterations: 0,
			..LayoutParams::default()
		});
		layout.set_data(&data(4, &[]), 800.0, 600.0);

		let expected = [(550.0, 300.0), (400.0, 450.0), (250.0, 300.0), (400.0, 150.0)];
		for (node, (x, y)) in layout.nodes().iter().zip(expected) {
			assert!((node.x - x).abs() < 1e-9 && (node.y - y).abs() < 1e-9);
			assert_eq!(node.radius, 8.0);
		}
	}

	#[test]
	fn empty_graph_is_a_no_op() {
		let layout = laid_out(0, &[]);
		assert!(layout.is_empty());
		assert_eq!(layout.resolved_links().count(), 0);
	}

	#[test]
	fn single_node_does_not_move() {
		let layout = laid_out(1, &[]);
		let node = &layout.nodes()[0];
		assert_eq!((node.x, node.y), (550.0, 300.0));
	}

	#[test]
	fn linked_pair_settles_near_equilibrium() {
		let layout = laid_out(2, &[("0", "1")]);
		let d = distance(&layout, "0", "1");
		// repulsion / d^2 == attraction * d  =>  d ~= 67
		assert!(d > 60.0 && d < 80.0, "distance {}", d);

		// forces are symmetric, so the centre of mass stays put
		let (a, b) = (&layout.nodes()[0], &layout.nodes()[1]);
		assert!(((a.x + b.x) / 2.0 - 400.0).abs() < 1e-6);
		assert!(((a.y + b.y) / 2.0 - 300.0).abs() < 1e-6);
	}

	#[test]
	fn linked_nodes_end_closer_than_unlinked() {
		let layout = laid_out(4, &[("0", "1"), ("2", "3")]);
		let linked = distance(&layout, "0", "1").max(distance(&layout, "2", "3"));
		let unlinked = distance(&layout, "0", "2").min(distance(&layout, "1", "3"));
		assert!(linked < unlinked, "{} vs {}", linked, unlinked);
	}

	#[test]
	fn dangling_links_are_ignored() {
		let clean = laid_out(3, &[("0", "1")]);
		let dangling = laid_out(3, &[("0", "1"), ("1", "ghost"), ("nobody", "2")]);

		assert_eq!(dangling.links().len(), 3);
		assert_eq!(dangling.resolved_links().count(), 1);
		for (a, b) in clean.nodes().iter().zip(dangling.nodes()) {
			assert_eq!((a.x, a.y), (b.x, b.y));
		}
	}

	#[test]
	fn coincident_nodes_stay_finite() {
		let mut layout = ForceLayout::new(LayoutParams {
			seed_radius: 0.0,
			..LayoutParams::default()
		});
		layout.set_data(&data(3, &[("0", "1")]), 100.0, 100.0);
		assert!(layout.nodes().iter().all(|n| n.x.is_finite() && n.y.is_finite()));
	}

	#[test]
	fn set_data_starts_over() {
		let mut layout = laid_out(3, &[("0", "1")]);
		layout.set_data(&data(2, &[]), 800.0, 600.0);
		assert_eq!(layout.nodes().len(), 2);
		assert_eq!(layout.resolved_links().count(), 0);

		let again = laid_out(2, &[]);
		assert_eq!(distance(&layout, "0", "1"), distance(&again, "0", "1"));
	}
}
