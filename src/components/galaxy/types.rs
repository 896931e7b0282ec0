#[derive(Clone, Debug, PartialEq)]
pub struct GalaxyNode {
	pub id: String,
	pub name: String,
	pub category: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GalaxyLink {
	pub source: String,
	pub target: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GalaxyData {
	pub nodes: Vec<GalaxyNode>,
	pub links: Vec<GalaxyLink>,
}
