use std::any::{type_name, Any, TypeId};
use std::cell::{RefCell, Ref, RefMut};
use crate::HashMap;

/// Game structure, which acts as a simple container of [`Domain`]s.
/// Contains no logic on its own.
pub struct Game {
    domains: HashMap<TypeId, Box<dyn Any>>,
}

impl Game {

    pub fn new() -> Self {
        Self {
            domains: HashMap::default()
        }
    }

    /// Adds a domain to the game, replacing any domain of the same type.
    pub fn add<D: Domain>(&mut self, domain: D) -> &mut Self {
        self.domains.insert(TypeId::of::<D>(), Box::new(RefCell::new(domain)));
        self
    }

    /// Adds a domain to the game unless one is already present.
    pub fn init<D: Domain>(&mut self, producer: impl FnOnce(&mut Game) -> D) -> &mut Self {
        let type_id = TypeId::of::<D>();
        if !self.domains.contains_key(&type_id) {
            let domain = producer(self);
            self.domains.insert(type_id, Box::new(RefCell::new(domain)));
        }
        self
    }

    /// Returns true if a domain with the type specified is present.
    pub fn contains<D: Domain>(&self) -> bool {
        self.domains.contains_key(&TypeId::of::<D>())
    }

    pub fn get<'a, E0: DomainExtractor<'a>>(&'a self) -> E0::Data {
        E0::extract(self)
    }

    pub fn all<'a, S: DomainSet<'a>>(&'a self) -> S::Data {
        S::extract(self)
    }

    /// Fetches a domain by type.
    /// Panics if the domain was never added.
    pub fn get_cell<D: Domain>(&self) -> &RefCell<D> {
        match self.try_get_cell() {
            Some(cell) => cell,
            None => panic!("Domain {} not found", type_name::<D>()),
        }
    }

    /// Fetches a domain by type.
    pub fn try_get_cell<D: Domain>(&self) -> Option<&RefCell<D>> {
        let domain_id = TypeId::of::<D>();
        let any = self.domains.get(&domain_id)?;
        any.downcast_ref::<RefCell<D>>()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/**
 * A place where logic of a certain variety is performed.
 * IE: Graphics, scene, input etc.
 */
pub trait Domain: Any {}
impl<D: Any> Domain for D {}


pub trait DomainSet<'a> {
    type Data;
    fn extract(game: &'a Game) -> Self::Data;
}

impl<'a, E0, E1> DomainSet<'a> for (E0, E1)
where
    E0: DomainExtractor<'a>,
    E1: DomainExtractor<'a>
{
    type Data = (
        E0::Data,
        E1::Data,
    );
    fn extract(game: &'a Game) -> Self::Data {
        (
            E0::extract(game),
            E1::extract(game),
        )
    }
}

impl<'a, E0, E1, E2> DomainSet<'a> for (E0, E1, E2)
where
    E0: DomainExtractor<'a>,
    E1: DomainExtractor<'a>,
    E2: DomainExtractor<'a>,
{
    type Data = (
        E0::Data,
        E1::Data,
        E2::Data,
    );
    fn extract(game: &'a Game) -> Self::Data {
        (
            E0::extract(game),
            E1::extract(game),
            E2::extract(game),
        )
    }
}


pub trait DomainExtractor<'a> {
    type Data;
    fn extract(game: &'a Game) -> Self::Data;
}

impl<'a, D0> DomainExtractor<'a> for &'a D0
where D0: Domain {
    type Data = Ref<'a, D0>;
    fn extract(game: &'a Game) -> Self::Data {
        let d0 = game.get_cell::<D0>();
        d0.borrow()
    }
}

impl<'a, D0> DomainExtractor<'a> for &'a mut D0
where D0: Domain {
    type Data = RefMut<'a, D0>;
    fn extract(game: &'a Game) -> Self::Data {
        let d0 = game.get_cell::<D0>();
        d0.borrow_mut()
    }
}


#[cfg(test)]
mod test {
    use crate::Game;

    struct Score(u32);
    struct Name(&'static str);

    #[test]
    fn add_and_get() {
        let mut game = Game::new();
        game.add(Score(3)).add(Name("tri"));
        assert!(game.contains::<Score>());
        assert_eq!(3, game.get::<&Score>().0);
        game.get::<&mut Score>().0 = 4;
        let (score, name) = game.all::<(&Score, &Name)>();
        assert_eq!(4, score.0);
        assert_eq!("tri", name.0);
    }

    #[test]
    fn init_keeps_existing_domain() {
        let mut game = Game::new();
        game.add(Score(1));
        game.init(|_| Score(2));
        assert_eq!(1, game.get::<&Score>().0);
        game.init(|game| Name(if game.contains::<Score>() { "scored" } else { "empty" }));
        assert_eq!("scored", game.get::<&Name>().0);
    }

    #[test]
    fn missing_domain() {
        let game = Game::new();
        assert!(!game.contains::<Score>());
        assert!(game.try_get_cell::<Score>().is_none());
    }
}
