//! Project list and the per-project view with its tabs

use crate::app::container::{ChangeEvent, Collection, Detail, Refresh};
use crate::app::dispatch::Dispatcher;
use crate::app::documents::DocumentList;
use crate::app::parameters::ParameterLibrary;
use crate::error::ApiError;
use crate::messages::network::{ApiOp, Scope};
use crate::messages::render::{ListView, ProjectPageView, ProjectsView};
use crate::models::{FrontPage, Id, Project};

#[derive(Clone, Debug, Default)]
pub struct ProjectList {
    projects: Collection<Project>,
    selected: usize,
    pending_select: Option<Id>,
}

impl ProjectList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projects(&self) -> &Collection<Project> {
        &self.projects
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.projects.items().get(self.selected)
    }

    pub fn load(&mut self, dispatch: &mut Dispatcher) {
        self.projects.begin_load();
        dispatch.send(Scope::ROOT, ApiOp::ListProjects);
    }

    pub fn finish_load(&mut self, result: Result<Vec<Project>, ApiError>) {
        self.projects.finish_load(result);
        if let Some(index) = self
            .pending_select
            .take()
            .and_then(|id| self.projects.position(id))
        {
            self.selected = index;
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.projects.len().saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.projects.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn on_created(&mut self, project: &Project, dispatch: &mut Dispatcher) {
        if self.projects.reduce(ChangeEvent::created(project.id)) == Refresh::Reload {
            self.pending_select = Some(project.id);
            self.load(dispatch);
        }
    }

    pub fn on_updated(&mut self, project: Project) {
        self.projects.patch(project);
    }

    pub fn on_deleted(&mut self, id: Id) {
        self.projects.reduce(ChangeEvent::deleted(id));
        self.clamp_selection();
    }

    /// Drop everything, e.g. after sign-out
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn view(&self) -> ProjectsView {
        ProjectsView {
            items: self.projects.items().to_vec(),
            selected: self.selected,
            loading: self.projects.is_loading(),
            error: self.projects.error().map(str::to_string),
            loaded_at: self.projects.loaded_at(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProjectTab {
    #[default]
    Docs,
    Parameters,
    Pages,
    Settings,
}

impl ProjectTab {
    pub const ALL: [ProjectTab; 4] = [
        ProjectTab::Docs,
        ProjectTab::Parameters,
        ProjectTab::Pages,
        ProjectTab::Settings,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ProjectTab::Docs => "API Docs",
            ProjectTab::Parameters => "URL Parameters",
            ProjectTab::Pages => "Pages",
            ProjectTab::Settings => "Settings",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ProjectTab::Docs => 0,
            ProjectTab::Parameters => 1,
            ProjectTab::Pages => 2,
            ProjectTab::Settings => 3,
        }
    }

    pub fn next(&self) -> ProjectTab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> ProjectTab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Everything shown while a project is open; discarded on leave
#[derive(Clone, Debug)]
pub struct ProjectView {
    scope: Scope,
    project_id: Id,
    project: Detail<Project>,
    tab: ProjectTab,
    pub documents: DocumentList,
    pub parameters: ParameterLibrary,
    pages: Collection<FrontPage>,
    page_selected: usize,
}

impl ProjectView {
    /// Open a project: fetch its detail and document list under a new scope
    pub fn open(project_id: Id, seed: Option<Project>, dispatch: &mut Dispatcher) -> Self {
        let scope = dispatch.new_scope();
        tracing::info!(project_id, scope = scope.0, "Opening project");

        let mut project = Detail::new();
        if let Some(seed) = seed {
            project.set(seed);
        }
        project.begin_load();
        dispatch.send(scope, ApiOp::GetProject(project_id));

        let mut documents = DocumentList::new(project_id);
        documents.load(scope, dispatch);

        ProjectView {
            scope,
            project_id,
            project,
            tab: ProjectTab::Docs,
            documents,
            parameters: ParameterLibrary::new(project_id),
            pages: Collection::new(),
            page_selected: 0,
        }
    }

    /// Cancel everything still in flight for this project
    pub fn close(&self, dispatch: &mut Dispatcher) {
        tracing::info!(project_id = self.project_id, scope = self.scope.0, "Leaving project");
        dispatch.cancel(self.scope);
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn project_id(&self) -> Id {
        self.project_id
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.value()
    }

    pub fn tab(&self) -> ProjectTab {
        self.tab
    }

    pub fn pages(&self) -> &Collection<FrontPage> {
        &self.pages
    }

    pub fn set_tab(&mut self, tab: ProjectTab, dispatch: &mut Dispatcher) {
        self.tab = tab;
        match tab {
            ProjectTab::Parameters => self.parameters.ensure_loaded(self.scope, dispatch),
            ProjectTab::Pages => {
                if !self.pages.has_loaded() && !self.pages.is_loading() {
                    self.load_pages(dispatch);
                }
            }
            ProjectTab::Docs | ProjectTab::Settings => {}
        }
    }

    /// Reload whatever the current tab shows
    pub fn reload(&mut self, dispatch: &mut Dispatcher) {
        match self.tab {
            ProjectTab::Docs => {
                self.documents.load(self.scope, dispatch);
                self.documents.refetch_expanded(self.scope, dispatch);
            }
            ProjectTab::Parameters => self.parameters.load(self.scope, dispatch),
            ProjectTab::Pages => self.load_pages(dispatch),
            ProjectTab::Settings => {
                self.project.begin_load();
                dispatch.send(self.scope, ApiOp::GetProject(self.project_id));
            }
        }
    }

    fn load_pages(&mut self, dispatch: &mut Dispatcher) {
        self.pages.begin_load();
        dispatch.send(self.scope, ApiOp::ListPages(self.project_id));
    }

    pub fn finish_project(&mut self, result: Result<Project, ApiError>) {
        self.project.finish_load(result);
    }

    pub fn on_project_updated(&mut self, project: Project) {
        self.project.set(project);
    }

    pub fn finish_pages(&mut self, result: Result<Vec<FrontPage>, ApiError>) {
        self.pages.finish_load(result);
        self.page_selected = self.page_selected.min(self.pages.len().saturating_sub(1));
    }

    pub fn select_next_page(&mut self) {
        if self.page_selected + 1 < self.pages.len() {
            self.page_selected += 1;
        }
    }

    pub fn select_prev_page(&mut self) {
        self.page_selected = self.page_selected.saturating_sub(1);
    }

    pub fn view(&self) -> ProjectPageView {
        ProjectPageView {
            project_id: self.project_id,
            project: self.project.value().cloned(),
            project_loading: self.project.is_loading(),
            project_error: self.project.error().map(str::to_string),
            tab: self.tab,
            docs: self.documents.view(),
            params: ListView {
                items: self.parameters.params().items().to_vec(),
                selected: self.parameters.selected(),
                loading: self.parameters.params().is_loading(),
                error: self.parameters.params().error().map(str::to_string),
            },
            pages: ListView {
                items: self.pages.items().to_vec(),
                selected: self.page_selected,
                loading: self.pages.is_loading(),
                error: self.pages.error().map(str::to_string),
            },
            loaded_at: self.documents.docs().loaded_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: Id, name: &str) -> Project {
        Project {
            id,
            name: name.into(),
            description: String::new(),
            instruction: String::new(),
            base_web_url: String::new(),
            base_api_url: String::new(),
            created_by: None,
            handover_text: None,
            to_do_request: None,
        }
    }

    #[test]
    fn test_tabs_cycle() {
        assert_eq!(ProjectTab::Docs.prev(), ProjectTab::Settings);
        assert_eq!(ProjectTab::Settings.next(), ProjectTab::Docs);
        assert_eq!(ProjectTab::Parameters.next(), ProjectTab::Pages);
    }

    #[test]
    fn test_open_fetches_detail_and_docs_then_tabs_load_lazily() {
        let mut dispatch = Dispatcher::new();
        let mut view = ProjectView::open(5, Some(project(5, "Shop")), &mut dispatch);
        assert_eq!(view.project().map(|p| p.name.as_str()), Some("Shop"));
        assert_eq!(
            dispatch.queued_ops(),
            vec![&ApiOp::GetProject(5), &ApiOp::ListDocuments(5)]
        );
        dispatch.drain();

        view.set_tab(ProjectTab::Pages, &mut dispatch);
        view.set_tab(ProjectTab::Docs, &mut dispatch);
        view.set_tab(ProjectTab::Pages, &mut dispatch);
        assert_eq!(dispatch.queued_ops(), vec![&ApiOp::ListPages(5)]);
    }

    #[test]
    fn test_created_project_is_selected_after_reload() {
        let mut dispatch = Dispatcher::new();
        let mut list = ProjectList::new();
        list.finish_load(Ok(vec![project(1, "a")]));

        list.on_created(&project(2, "b"), &mut dispatch);
        assert_eq!(dispatch.queued_ops(), vec![&ApiOp::ListProjects]);
        list.finish_load(Ok(vec![project(1, "a"), project(2, "b")]));
        assert_eq!(list.selected_project().map(|p| p.id), Some(2));
        assert_eq!(list.projects().items().iter().filter(|p| p.id == 2).count(), 1);

        list.on_deleted(2);
        assert_eq!(list.selected_project().map(|p| p.id), Some(1));
    }
}
