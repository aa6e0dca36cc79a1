//! Binding of page controls to the persisted selection.

use ratatoskr_model::{GroupScopedTag, SelectionLayout, StringSet};
use ratatoskr_persistence::{PersistedSession, RecordUpdate, Storage};

use crate::config::WidgetConfig;
use crate::dom::{Document, DomNode, GroupList, ToggleControl};
use crate::error::{Result, WidgetError};

/// Which selection a control belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlRole {
    /// Opens or closes a group of tags.
    Group,
    /// Selects a tag.
    Tag,
}

/// Handle for routing a control's events back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(usize);

impl BindingId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One control and the identifier it toggles.
#[derive(Debug, Clone)]
pub struct Binding<N> {
    role: ControlRole,
    key: String,
    control: ToggleControl<N>,
}

impl<N: DomNode> Binding<N> {
    pub fn role(&self) -> ControlRole {
        self.role
    }

    /// The selection identifier: the control name, or `group::name` for
    /// tags in the grouped layout.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn control(&self) -> &ToggleControl<N> {
        &self.control
    }
}

/// Owns the selections and their persisted record.
///
/// Built once per page. Construction reflects the restored record onto the
/// controls; [`on_toggle`](Self::on_toggle) is then called from each
/// control's event handler.
#[derive(Debug)]
pub struct SelectionController<S: Storage, N> {
    layout: SelectionLayout,
    session: PersistedSession<S>,
    opened_groups: StringSet,
    selected_tags: StringSet,
    bindings: Vec<Binding<N>>,
}

impl<S: Storage, N: DomNode> SelectionController<S, N> {
    /// Bind every group and tag control of `document`.
    ///
    /// Fails when a selector is invalid, or a control is not a checkbox or
    /// button, has no name, or (grouped layout) sits outside a list with an
    /// id.
    pub fn bind<D>(
        document: &D,
        session: PersistedSession<S>,
        config: &WidgetConfig,
    ) -> Result<Self>
    where
        D: Document<Node = N> + ?Sized,
    {
        let opened_groups = StringSet::from(session.record().opened_groups.clone());
        let selected_tags = StringSet::from(session.record().selected_tags.clone());
        let mut bindings = Vec::new();

        if config.layout.is_grouped() {
            // Containers are found with `closest`, which cannot report a bad
            // selector; check it here instead.
            document.query_all(&config.group_container)?;
            for node in document.query_all(&config.group_selector)? {
                let control = ToggleControl::from_node(node)?;
                let key = control.name().to_string();
                control.set_selected(opened_groups.contains(&key));
                bindings.push(Binding {
                    role: ControlRole::Group,
                    key,
                    control,
                });
            }
        }

        for node in document.query_all(&config.tag_selector)? {
            let control = ToggleControl::from_node(node)?;
            let key = match config.layout {
                SelectionLayout::Flat => control.name().to_string(),
                SelectionLayout::Grouped => {
                    let list = GroupList::enclosing(&control, &config.group_container)?;
                    GroupScopedTag::new(list.group(), control.name()).key()
                }
            };
            control.set_selected(selected_tags.contains(&key));
            bindings.push(Binding {
                role: ControlRole::Tag,
                key,
                control,
            });
        }

        tracing::debug!(
            layout = %config.layout,
            controls = bindings.len(),
            restored_tags = selected_tags.len(),
            restored_groups = opened_groups.len(),
            "bound selection controls"
        );

        Ok(Self {
            layout: config.layout,
            session,
            opened_groups,
            selected_tags,
            bindings,
        })
    }

    /// Handle a toggle event from the control behind `id`.
    ///
    /// Flips the identifier, syncs the control's visual state and writes the
    /// record through before returning. A failed write is logged; the
    /// in-memory selection still changes. Returns whether the identifier is
    /// now selected.
    pub fn on_toggle(&mut self, id: BindingId) -> Result<bool> {
        let binding = self
            .bindings
            .get(id.0)
            .ok_or(WidgetError::UnknownBinding(id.0))?;

        let was_selected = match binding.role {
            ControlRole::Group => self.opened_groups.toggle(binding.key.as_str()),
            ControlRole::Tag => self.selected_tags.toggle(binding.key.as_str()),
        };
        binding.control.set_selected(!was_selected);

        let change = match binding.role {
            ControlRole::Group => RecordUpdate::OpenedGroups(self.opened_groups.get()),
            ControlRole::Tag => RecordUpdate::SelectedTags(self.selected_tags.get()),
        };
        if let Err(e) = self.session.update(change) {
            tracing::warn!(key = %binding.key, error = %e, "failed to persist selection");
        }
        Ok(!was_selected)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (BindingId, &Binding<N>)> {
        self.bindings
            .iter()
            .enumerate()
            .map(|(index, binding)| (BindingId(index), binding))
    }

    /// Find the binding for `key` in the given role.
    pub fn binding_id(&self, role: ControlRole, key: &str) -> Option<BindingId> {
        self.bindings()
            .find(|(_, binding)| binding.role == role && binding.key == key)
            .map(|(id, _)| id)
    }

    pub fn layout(&self) -> SelectionLayout {
        self.layout
    }

    pub fn selected_tags(&self) -> &StringSet {
        &self.selected_tags
    }

    pub fn opened_groups(&self) -> &StringSet {
        &self.opened_groups
    }

    pub fn session(&self) -> &PersistedSession<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PersistedSession<S> {
        &mut self.session
    }
}
