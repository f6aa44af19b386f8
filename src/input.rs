use crate::note::NoteName;

/// A raw input event, already translated into surface terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// A key symbol as typed. Repeats arrive as fresh presses.
    Key(char),
    /// A click at a point relative to the surface's top-left corner.
    Pointer { x: f32, y: f32 },
}

/// The clickable area of one key on the on-screen keyboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyRegion {
    pub name: NoteName,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl KeyRegion {
    /// Edges are inclusive, so a point on a shared edge matches both
    /// neighbours; lookups take the leftmost.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Split the bottom `key_height` pixels of a `width x height` surface into
/// one equal-width column per natural note.
pub fn layout_keyboard(width: f32, height: f32, key_height: f32) -> Vec<KeyRegion> {
    let key_width = width / NoteName::KEYBOARD.len() as f32;
    NoteName::KEYBOARD
        .iter()
        .enumerate()
        .map(|(i, &name)| KeyRegion {
            name,
            x: i as f32 * key_width,
            y: height - key_height,
            width: key_width,
            height: key_height,
        })
        .collect()
}

/// Map a typed key to a note. Case-insensitive; anything other than
/// a natural note letter gives None.
pub fn resolve_key(c: char) -> Option<NoteName> {
    NoteName::from_letter(c.to_ascii_uppercase())
}

/// Map a click to the note of the first key region containing it.
pub fn resolve_pointer(x: f32, y: f32, regions: &[KeyRegion]) -> Option<NoteName> {
    regions.iter().find(|r| r.contains(x, y)).map(|r| r.name)
}

/// Resolve either input modality against the current key regions.
pub fn resolve(input: Input, regions: &[KeyRegion]) -> Option<NoteName> {
    match input {
        Input::Key(c) => resolve_key(c),
        Input::Pointer { x, y } => resolve_pointer(x, y, regions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(resolve_key('c'), Some(NoteName::C));
        assert_eq!(resolve_key('G'), Some(NoteName::G));
        assert_eq!(resolve_key('b'), Some(NoteName::B));
        assert_eq!(resolve_key('H'), None);
        assert_eq!(resolve_key('h'), None);
        assert_eq!(resolve_key('1'), None);
        assert_eq!(resolve_key(' '), None);
    }

    #[test]
    fn test_every_note_round_trips() {
        let regions = layout_keyboard(700.0, 400.0, 80.0);
        for region in &regions {
            let cx = region.x + region.width / 2.0;
            let cy = region.y + region.height / 2.0;
            assert_eq!(resolve_pointer(cx, cy, &regions), Some(region.name));
            assert_eq!(resolve_key(region.name.letter()), Some(region.name));
            assert_eq!(
                resolve_key(region.name.letter().to_ascii_lowercase()),
                Some(region.name)
            );
        }
    }

    #[test]
    fn test_layout_partitions_width() {
        let regions = layout_keyboard(700.0, 400.0, 80.0);
        assert_eq!(regions.len(), 7);
        assert_eq!(regions[0].x, 0.0);
        assert_eq!(regions[3].x, 300.0);
        assert_eq!(regions[6].x + regions[6].width, 700.0);
        assert!(regions.iter().all(|r| r.y == 320.0 && r.height == 80.0));
    }

    #[test]
    fn test_click_outside_keyboard() {
        let regions = layout_keyboard(700.0, 400.0, 80.0);
        assert_eq!(resolve_pointer(350.0, 100.0, &regions), None);
        assert_eq!(resolve_pointer(350.0, 401.0, &regions), None);
        assert_eq!(resolve_pointer(-1.0, 350.0, &regions), None);
    }

    #[test]
    fn test_shared_edge_goes_left() {
        let regions = layout_keyboard(700.0, 400.0, 80.0);
        assert_eq!(resolve_pointer(100.0, 350.0, &regions), Some(NoteName::C));
    }

    #[test]
    fn test_no_regions_no_match() {
        assert_eq!(resolve(Input::Pointer { x: 10.0, y: 10.0 }, &[]), None);
        assert_eq!(resolve(Input::Key('e'), &[]), Some(NoteName::E));
    }
}
