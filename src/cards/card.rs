//! Card values.
//!
//! A `Card` is an immutable pair of a per-instance `CardId` and a `CardFace`
//! saying what is printed on it. Cards are `Copy`; moving a card between
//! piles and hands copies the value, and the id keeps instances apart.

use serde::{Deserialize, Serialize};

/// Identifier for one physical card in a deck.
///
/// Assigned from a counter when the deck is built; unique within a deck,
/// meaningless across games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Score modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    /// Doubles the number-card sum.
    Double,
    Plus2,
    Plus4,
    Plus6,
    Plus8,
    Plus10,
}

impl Modifier {
    /// One of each, in deck order.
    pub const ALL: [Modifier; 6] = [
        Modifier::Double,
        Modifier::Plus2,
        Modifier::Plus4,
        Modifier::Plus6,
        Modifier::Plus8,
        Modifier::Plus10,
    ];

    /// Flat points added by this modifier. Zero for `Double`.
    #[must_use]
    pub const fn bonus(self) -> u32 {
        match self {
            Modifier::Double => 0,
            Modifier::Plus2 => 2,
            Modifier::Plus4 => 4,
            Modifier::Plus6 => 6,
            Modifier::Plus8 => 8,
            Modifier::Plus10 => 10,
        }
    }

    #[must_use]
    pub const fn is_double(self) -> bool {
        matches!(self, Modifier::Double)
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Modifier::Double => write!(f, "x2"),
            other => write!(f, "+{}", other.bonus()),
        }
    }
}

/// Action card effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Locks a target's round score and ends their round.
    Freeze,
    /// Forces a target to draw three cards.
    FlipThree,
    /// Banks one cancelled bust for the player who drew it.
    SecondChance,
}

impl ActionKind {
    /// One of each, in deck order.
    pub const ALL: [ActionKind; 3] = [ActionKind::Freeze, ActionKind::FlipThree, ActionKind::SecondChance];

    /// The targeted effect of this card, or `None` for Second Chance,
    /// which always stays with the player who drew it.
    #[must_use]
    pub const fn target_action(self) -> Option<TargetAction> {
        match self {
            ActionKind::Freeze => Some(TargetAction::Freeze),
            ActionKind::FlipThree => Some(TargetAction::FlipThree),
            ActionKind::SecondChance => None,
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::Freeze => "Freeze",
            ActionKind::FlipThree => "Flip Three",
            ActionKind::SecondChance => "Second Chance",
        };
        f.write_str(name)
    }
}

/// Action effects that must be aimed at a seat before they apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetAction {
    Freeze,
    FlipThree,
}

impl From<TargetAction> for ActionKind {
    fn from(action: TargetAction) -> Self {
        match action {
            TargetAction::Freeze => ActionKind::Freeze,
            TargetAction::FlipThree => ActionKind::FlipThree,
        }
    }
}

impl std::fmt::Display for TargetAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&ActionKind::from(*self), f)
    }
}

/// Card category, without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Number,
    Modifier,
    Action,
}

/// What is printed on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardFace {
    /// Number card, value 0 through 12.
    Number(u8),
    Modifier(Modifier),
    Action(ActionKind),
}

/// A single card instance.
///
/// ```
/// use flip_seven::cards::{Card, CardId, CardKind};
///
/// let card = Card::number(CardId::new(3), 9);
/// assert_eq!(card.kind(), CardKind::Number);
/// assert_eq!(card.number_value(), Some(9));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    face: CardFace,
}

impl Card {
    /// Create a card from an id and a face.
    #[must_use]
    pub const fn new(id: CardId, face: CardFace) -> Self {
        Self { id, face }
    }

    /// Create a number card.
    #[must_use]
    pub const fn number(id: CardId, value: u8) -> Self {
        Self::new(id, CardFace::Number(value))
    }

    /// Create a modifier card.
    #[must_use]
    pub const fn modifier(id: CardId, modifier: Modifier) -> Self {
        Self::new(id, CardFace::Modifier(modifier))
    }

    /// Create an action card.
    #[must_use]
    pub const fn action(id: CardId, action: ActionKind) -> Self {
        Self::new(id, CardFace::Action(action))
    }

    #[must_use]
    pub const fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub const fn face(&self) -> CardFace {
        self.face
    }

    #[must_use]
    pub const fn kind(&self) -> CardKind {
        match self.face {
            CardFace::Number(_) => CardKind::Number,
            CardFace::Modifier(_) => CardKind::Modifier,
            CardFace::Action(_) => CardKind::Action,
        }
    }

    /// The printed value, if this is a number card.
    #[must_use]
    pub const fn number_value(&self) -> Option<u8> {
        match self.face {
            CardFace::Number(value) => Some(value),
            _ => None,
        }
    }

    /// The modifier, if this is a modifier card.
    #[must_use]
    pub const fn as_modifier(&self) -> Option<Modifier> {
        match self.face {
            CardFace::Modifier(modifier) => Some(modifier),
            _ => None,
        }
    }

    /// The action, if this is an action card.
    #[must_use]
    pub const fn as_action(&self) -> Option<ActionKind> {
        match self.face {
            CardFace::Action(action) => Some(action),
            _ => None,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.face {
            CardFace::Number(value) => write!(f, "{}", value),
            CardFace::Modifier(modifier) => write!(f, "{}", modifier),
            CardFace::Action(action) => write!(f, "{}", action),
        }
    }
}
