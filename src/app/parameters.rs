//! URL parameter library of a project

use crate::app::container::{ChangeEvent, Collection, Refresh};
use crate::app::dispatch::Dispatcher;
use crate::error::ApiError;
use crate::messages::network::{ApiOp, Scope};
use crate::models::{Id, UrlParameter};

#[derive(Clone, Debug)]
pub struct ParameterLibrary {
    project_id: Id,
    params: Collection<UrlParameter>,
    selected: usize,
}

impl ParameterLibrary {
    pub fn new(project_id: Id) -> Self {
        ParameterLibrary {
            project_id,
            params: Collection::new(),
            selected: 0,
        }
    }

    pub fn params(&self) -> &Collection<UrlParameter> {
        &self.params
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_param(&self) -> Option<&UrlParameter> {
        self.params.items().get(self.selected)
    }

    /// Load on first use only
    pub fn ensure_loaded(&mut self, scope: Scope, dispatch: &mut Dispatcher) {
        if !self.params.has_loaded() && !self.params.is_loading() {
            self.load(scope, dispatch);
        }
    }

    pub fn load(&mut self, scope: Scope, dispatch: &mut Dispatcher) {
        self.params.begin_load();
        dispatch.send(scope, ApiOp::ListParameters(self.project_id));
    }

    pub fn finish_load(&mut self, result: Result<Vec<UrlParameter>, ApiError>) {
        self.params.finish_load(result);
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.params.len().saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.params.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn on_created(&mut self, param: &UrlParameter, scope: Scope, dispatch: &mut Dispatcher) {
        if self.params.reduce(ChangeEvent::created(param.id)) == Refresh::Reload {
            self.load(scope, dispatch);
        }
    }

    /// The server echoes the updated parameter, so patch in place
    pub fn on_updated(&mut self, param: UrlParameter) {
        self.params.patch(param);
    }

    pub fn on_deleted(&mut self, id: Id) {
        self.params.reduce(ChangeEvent::deleted(id));
        self.clamp_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(id: Id, token: &str) -> UrlParameter {
        UrlParameter {
            id,
            project_under: Some(2),
            parameter: token.into(),
            description: "d".into(),
        }
    }

    #[test]
    fn test_lazy_load_happens_once() {
        let mut dispatch = Dispatcher::new();
        let scope = dispatch.new_scope();
        let mut library = ParameterLibrary::new(2);

        library.ensure_loaded(scope, &mut dispatch);
        library.ensure_loaded(scope, &mut dispatch);
        assert_eq!(dispatch.queued_ops(), vec![&ApiOp::ListParameters(2)]);

        library.finish_load(Ok(vec![param(1, "{id}")]));
        library.ensure_loaded(scope, &mut dispatch);
        assert_eq!(dispatch.queued_ops().len(), 1);
    }

    #[test]
    fn test_create_reloads_update_patches_delete_removes() {
        let mut dispatch = Dispatcher::new();
        let scope = dispatch.new_scope();
        let mut library = ParameterLibrary::new(2);
        library.finish_load(Ok(vec![param(1, "{id}"), param(2, "{slug}")]));

        library.on_created(&param(3, "{page}"), scope, &mut dispatch);
        assert_eq!(dispatch.queued_ops(), vec![&ApiOp::ListParameters(2)]);
        library.finish_load(Ok(vec![param(1, "{id}"), param(2, "{slug}"), param(3, "{page}")]));
        assert_eq!(library.params().len(), 3);

        library.on_updated(param(2, "{name}"));
        assert_eq!(library.params().get(2).unwrap().parameter, "{name}");

        library.select_next();
        library.select_next();
        library.on_deleted(3);
        assert_eq!(library.params().len(), 2);
        assert_eq!(library.selected(), 1);
        assert_eq!(dispatch.queued_ops().len(), 1);
    }
}
