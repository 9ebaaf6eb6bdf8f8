//! Material price catalog
//!
//! Unit prices, stores and affiliate links for common DIY materials.
//! The table is compiled in and read-only.

use serde::Serialize;

const AMAZON: &str = "Amazon";
const AMAZON_LINK: &str = "https://amzn.to/3xK8L2M";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub unit_price: f64,
    pub unit: &'static str,
    pub store: &'static str,
    pub affiliate_link: &'static str,
    pub display_name: &'static str,
}

const fn amazon(
    name: &'static str,
    unit_price: f64,
    unit: &'static str,
    display_name: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        name,
        unit_price,
        unit,
        store: AMAZON,
        affiliate_link: AMAZON_LINK,
        display_name,
    }
}

static BUILTIN_ENTRIES: &[CatalogEntry] = &[
    // Lumber
    amazon("2x4 pine board", 8.50, "piece", "2x4 Pine Lumber"),
    amazon("2x4 pressure treated", 12.00, "piece", "Pressure Treated 2x4"),
    amazon("1x4 pine board", 6.00, "piece", "1x4 Pine Board"),
    amazon("1x6 pine board", 9.00, "piece", "1x6 Pine Board"),
    amazon("1x8 pine board", 12.00, "piece", "1x8 Pine Board"),
    amazon("1x10 pine board", 15.00, "piece", "1x10 Pine Board"),
    amazon("1x12 pine board", 18.00, "piece", "1x12 Pine Board"),
    amazon("2x6 pine board", 12.00, "piece", "2x6 Pine Board"),
    amazon("2x8 pine board", 16.00, "piece", "2x8 Pine Board"),
    amazon("2x10 pine board", 20.00, "piece", "2x10 Pine Board"),
    amazon("2x12 pine board", 24.00, "piece", "2x12 Pine Board"),
    // Sheet goods
    amazon("Plywood sheet (4x8)", 45.00, "sheet", "4x8 Plywood Sheet"),
    amazon("Plywood sheet (2x4)", 15.00, "sheet", "2x4 Plywood Sheet"),
    amazon("MDF sheet (4x8)", 35.00, "sheet", "4x8 MDF Sheet"),
    amazon("Particle board (4x8)", 25.00, "sheet", "4x8 Particle Board"),
    // Hardwood
    amazon("Oak board (1x6x8)", 28.00, "piece", "Oak Board 1x6x8"),
    amazon("Maple board (1x6x8)", 32.00, "piece", "Maple Board 1x6x8"),
    amazon("Cherry board (1x6x8)", 45.00, "piece", "Cherry Board 1x6x8"),
    amazon("Walnut board (1x6x8)", 55.00, "piece", "Walnut Board 1x6x8"),
    // Fasteners
    amazon("Wood screws (1.5\")", 8.00, "box of 50", "1.5\" Wood Screws"),
    amazon("Wood screws (2.5\")", 10.00, "box of 50", "2.5\" Wood Screws"),
    amazon("Wood screws (3\")", 12.00, "box of 50", "3\" Wood Screws"),
    amazon("Drywall screws", 6.00, "box of 100", "Drywall Screws"),
    amazon("Deck screws", 15.00, "box of 50", "Deck Screws"),
    amazon("Nails (finishing)", 5.00, "box of 100", "Finishing Nails"),
    amazon("Nails (common)", 4.00, "box of 100", "Common Nails"),
    // Hardware
    amazon("L-brackets", 3.00, "pair", "L-Brackets"),
    amazon("Corner braces", 4.00, "pair", "Corner Braces"),
    amazon("Hinges (3\")", 8.00, "pair", "3\" Hinges"),
    amazon("Hinges (4\")", 12.00, "pair", "4\" Hinges"),
    amazon("Drawer slides", 15.00, "pair", "Drawer Slides"),
    amazon("Cabinet handles", 6.00, "piece", "Cabinet Handles"),
    amazon("Cabinet knobs", 4.00, "piece", "Cabinet Knobs"),
    // Finishes
    amazon("Wood stain (quart)", 12.00, "quart", "Wood Stain Quart"),
    amazon("Wood stain (gallon)", 35.00, "gallon", "Wood Stain Gallon"),
    amazon("Polyurethane (quart)", 15.00, "quart", "Polyurethane Quart"),
    amazon("Polyurethane (gallon)", 45.00, "gallon", "Polyurethane Gallon"),
    amazon("Paint (quart)", 18.00, "quart", "Paint Quart"),
    amazon("Paint (gallon)", 35.00, "gallon", "Paint Gallon"),
    amazon("Primer (gallon)", 25.00, "gallon", "Primer Gallon"),
    // Sanding
    amazon("Sandpaper (80 grit)", 3.00, "pack of 5", "80 Grit Sandpaper"),
    amazon("Sandpaper (120 grit)", 3.00, "pack of 5", "120 Grit Sandpaper"),
    amazon("Sandpaper (220 grit)", 4.00, "pack of 5", "220 Grit Sandpaper"),
    amazon("Sandpaper (assorted)", 8.00, "variety pack", "Assorted Sandpaper Pack"),
    // Adhesives
    amazon("Wood glue", 8.00, "16oz bottle", "Wood Glue 16oz"),
    amazon("Construction adhesive", 6.00, "10oz tube", "Construction Adhesive"),
    amazon("Liquid nails", 5.00, "10oz tube", "Liquid Nails"),
    // Trim
    amazon("Crown molding", 12.00, "8ft piece", "Crown Molding 8ft"),
    amazon("Baseboard", 8.00, "8ft piece", "Baseboard 8ft"),
    amazon("Quarter round", 6.00, "8ft piece", "Quarter Round 8ft"),
    amazon("Door trim", 10.00, "8ft piece", "Door Trim 8ft"),
    amazon("Window trim", 8.00, "8ft piece", "Window Trim 8ft"),
];

/// Read-only view over a set of catalog entries, keyed by material name
#[derive(Debug, Clone, Copy)]
pub struct MaterialCatalog<'a> {
    entries: &'a [CatalogEntry],
}

impl MaterialCatalog<'static> {
    /// The catalog shipped with the planner
    pub fn builtin() -> Self {
        Self::new(BUILTIN_ENTRIES)
    }
}

impl<'a> MaterialCatalog<'a> {
    pub fn new(entries: &'a [CatalogEntry]) -> Self {
        Self { entries }
    }

    pub fn lookup(&self, name: &str) -> Option<&'a CatalogEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entries(&self) -> &'a [CatalogEntry] {
        self.entries
    }
}
