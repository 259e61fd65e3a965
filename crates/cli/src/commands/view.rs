use anyhow::Result;
use votereg_client::{DataClient, FetchState, FetchTask};
use votereg_core::{ApiConfig, Field};
use votereg_table::{
    Filter, SortDirection, SortModel, TableState, TableView, render_banner, render_text,
};

pub(crate) struct ViewOptions {
    pub width: u32,
    pub sort: Option<String>,
    pub desc: bool,
    pub page: usize,
    pub page_size: usize,
    pub filter: Option<String>,
}

impl ViewOptions {
    fn table_state(&self) -> Result<TableState> {
        let mut state = TableState::new(self.width);
        state.set_page_size(self.page_size)?;

        let field = match &self.sort {
            Some(name) => name.parse::<Field>()?,
            None => Field::State,
        };
        let direction =
            if self.desc { SortDirection::Descending } else { SortDirection::Ascending };
        state.sort = SortModel::new(field, direction);

        if let Some(raw) = &self.filter {
            state.set_filter(Some(raw.parse::<Filter>()?));
        }
        state.set_page(self.page);
        Ok(state)
    }
}

pub(crate) async fn run(api: &ApiConfig, options: ViewOptions) -> Result<()> {
    let state = options.table_state()?;
    let mut task = FetchTask::spawn(DataClient::from_config(api)?);
    let mut updates = task.subscribe();

    tokio::select! {
        _ = updates.wait_for(|s| !s.is_loading()) => {},
        _ = tokio::signal::ctrl_c() => task.cancel(),
    }

    let view = match task.join().await {
        Some(FetchState::Loaded(records)) => TableView::present(&records, &state),
        Some(FetchState::Failed { .. }) => TableView::failed(&state),
        Some(FetchState::Loading) | None => TableView::loading(&state),
    };
    print!("{}{}", render_banner(state.viewport()), render_text(&view));
    Ok(())
}
