pub const DEFAULT_COLOR: &str = "#6366f1";

const CATEGORY_COLORS: &[(&str, &str)] = &[
	("Computer Science", "#6366f1"),
	("Art", "#ec4899"),
	("Science", "#10b981"),
	("Business", "#f59e0b"),
	("Music", "#8b5cf6"),
	("Connector", "#fbbf24"),
	("Frontend", "#38bdf8"),
	("Backend", "#10b981"),
	("Python", "#f59e0b"),
	("DevOps", "#ec4899"),
];

/// Hex colour for a node category, falling back to indigo.
pub fn category_color(category: &str) -> &'static str {
	CATEGORY_COLORS
		.iter()
		.find(|(name, _)| *name == category)
		.map(|(_, color)| *color)
		.unwrap_or(DEFAULT_COLOR)
}

/// Append a two digit hex alpha to a `#rrggbb` colour.
pub fn with_alpha(color: &str, alpha: &str) -> String {
	format!("{}{}", color, alpha)
}
