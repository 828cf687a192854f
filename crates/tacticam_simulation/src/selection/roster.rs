//! Roster управляемых entities + текущий Selection

use bevy::prelude::*;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SelectionError {
    #[error("roster of controllable entities is empty")]
    EmptyRoster,

    #[error("selection index {index} out of range (roster has {len} entities)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("selected entity {0} no longer exists")]
    MissingEntity(Entity),
}

/// Фиксированный список управляемых entities (порядок = индексы выбора).
///
/// Roster не владеет lifetime'ом entities — только ссылается.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Roster {
    entities: Vec<Entity>,
}

impl Roster {
    pub fn new(entities: Vec<Entity>) -> Result<Self, SelectionError> {
        if entities.is_empty() {
            return Err(SelectionError::EmptyRoster);
        }
        Ok(Self { entities })
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Entity> {
        self.entities.get(index).copied()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }
}

/// Ровно одна выбранная entity из roster
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    entity: Entity,
    index: usize,
}

impl Selection {
    /// Selection по умолчанию — индекс 0
    pub fn first(roster: &Roster) -> Result<Self, SelectionError> {
        let entity = roster.get(0).ok_or(SelectionError::EmptyRoster)?;
        Ok(Self { entity, index: 0 })
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Явный выбор по индексу roster'а
    pub fn select(&mut self, roster: &Roster, index: usize) -> Result<Entity, SelectionError> {
        let entity = roster.get(index).ok_or(SelectionError::IndexOutOfRange {
            index,
            len: roster.len(),
        })?;
        self.entity = entity;
        self.index = index;
        Ok(entity)
    }
}

/// Запрос явной смены selection (UI / hotkeys)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectEntity {
    pub index: usize,
}

/// Установка roster + Selection (index 0) в world.
///
/// Пустой roster — ошибка конфигурации.
pub fn install_roster(world: &mut World, entities: Vec<Entity>) -> Result<Selection, SelectionError> {
    let roster = Roster::new(entities)?;
    let selection = Selection::first(&roster)?;
    world.insert_resource(roster);
    world.insert_resource(selection);
    Ok(selection)
}
