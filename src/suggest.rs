//! Project ideas by space type

use crate::fallback::Lookup;
use crate::models::SpaceType;

const OTHER_SUGGESTIONS: &[&str] = &[
    "Custom Shelf",
    "Storage Unit",
    "Decorative Piece",
    "Functional Furniture",
    "Custom Project",
];

type SuggestionTable = Lookup<SpaceType, &'static [&'static str]>;

static SUGGESTIONS: SuggestionTable = SuggestionTable::new(
    &[
        (
            SpaceType::Room,
            &[
                "Floating Shelf",
                "Corner Desk",
                "Wall Storage Unit",
                "Plant Stand",
                "Custom Bench",
            ],
        ),
        (
            SpaceType::Wall,
            &[
                "Floating Shelf",
                "Wall Art Display",
                "Hanging Storage",
                "Mirror Frame",
                "Wall Organizer",
            ],
        ),
        (
            SpaceType::Corner,
            &[
                "Corner Desk",
                "Corner Shelf",
                "Plant Corner",
                "Reading Nook",
                "Corner Cabinet",
            ],
        ),
        (
            SpaceType::Balcony,
            &[
                "Plant Stand",
                "Balcony Railing Shelf",
                "Outdoor Storage",
                "Hanging Garden",
                "Balcony Table",
            ],
        ),
        (
            SpaceType::Garage,
            &[
                "Tool Organizer",
                "Workbench",
                "Storage Shelves",
                "Pegboard System",
                "Garage Cabinet",
            ],
        ),
        (SpaceType::Other, OTHER_SUGGESTIONS),
    ],
    OTHER_SUGGESTIONS,
);

pub fn suggest_projects(space: &SpaceType) -> &'static [&'static str] {
    SUGGESTIONS.resolve(space)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garage_ideas() {
        let ideas = suggest_projects(&SpaceType::Garage);
        assert_eq!(ideas.len(), 5);
        assert_eq!(ideas[1], "Workbench");
    }

    #[test]
    fn unknown_space_uses_other_list() {
        assert_eq!(suggest_projects(&SpaceType::from("attic")), OTHER_SUGGESTIONS);
        assert_eq!(suggest_projects(&SpaceType::Other), OTHER_SUGGESTIONS);
    }
}
