use crate::LetterError;

/// Default source text the letters are drawn from.
pub const PROSE: &str = "Echo park cray pabst single-origin coffee tattooed. Polaroid yuccie etsy shoreditch, disrupt butcher authentic art party helvetica. Authentic kale chips keytar glossier shoreditcLetters.helpers. Chia lumbersexual mustache everyday carry mlkshk. Tacos farm-to-table craft beer, literally fingerstache 3 wolf moon poutine cardigan adaptogen roof party YOLO cornhole pork belly. Leggings adaptogen raclette fam bicycle rights bushwick stumptown venmo locavore woke. Authentic swag live-edge knausgaard, prism messenger bag waistcoat pop-up jean shorts bitters viral actually coloring book wayfarers. Sartorial mixtape iPhone before they sold out plaid hoodie. Portland pabst before they sold out woke banjo sartorial 3 wolf moon. Roof party enamel pin subway tile venmo, vexillologist cold-pressed occupy selfies seitan cliche offal mlkshk intelligentsia tumblr wayfarers. Glossier organic vexillologist lomo fixie.";

/// Cyclic supplier of letters from a fixed source text.
///
/// The cursor wraps only once it moves *past* the end of the text, so every
/// cycle contains one read at `cursor == len` which yields `None`.
#[derive(Clone, Debug)]
pub struct LetterCycler {
    chars: Vec<char>,
    cursor: isize,
}

impl LetterCycler {
    pub fn new() -> Self {
        Self { chars: PROSE.chars().collect(), cursor: -1 }
    }

    pub fn with_text(text: impl Into<String>) -> Result<Self, LetterError> {
        let chars: Vec<char> = text.into().chars().collect();
        if chars.is_empty() {
            return Err(LetterError::EmptySourceText);
        }
        Ok(Self { chars, cursor: -1 })
    }

    /// Advance the cursor and return the letter under it.
    pub fn next(&mut self) -> Option<char> {
        self.cursor += 1;
        if self.cursor > self.chars.len() as isize {
            self.cursor = 0;
        }

        self.chars.get(self.cursor as usize).copied()
    }

    /// Position of the last letter handed out, `-1` before the first call.
    pub fn cursor(&self) -> isize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl Default for LetterCycler {
    fn default() -> Self {
        Self::new()
    }
}
