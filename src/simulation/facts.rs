//! Planet trivia with a no-immediate-repeat draw

use rand::Rng;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactDeck {
    facts: Vec<String>,
    last_index: Option<usize>,
}

impl FactDeck {
    pub fn new<I, S>(facts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            facts: facts.into_iter().map(Into::into).collect(),
            last_index: None,
        }
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn facts(&self) -> &[String] {
        &self.facts
    }

    pub fn last_index(&self) -> Option<usize> {
        self.last_index
    }

    /// Draws a uniformly random fact.
    ///
    /// When more than one fact exists and the draw repeats the previous one,
    /// the next fact in order is taken instead of drawing again.
    pub fn choose_random<R: Rng>(&mut self, rng: &mut R) -> &str {
        if self.facts.is_empty() {
            return "";
        }

        let mut index = rng.random_range(0..self.facts.len());
        if self.facts.len() > 1 && Some(index) == self.last_index {
            index = (index + 1) % self.facts.len();
        }
        self.last_index = Some(index);
        &self.facts[index]
    }

    /// Last drawn fact, else the first, else empty
    pub fn current(&self) -> &str {
        self.last_index
            .or(if self.facts.is_empty() { None } else { Some(0) })
            .and_then(|index| self.facts.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }
}
