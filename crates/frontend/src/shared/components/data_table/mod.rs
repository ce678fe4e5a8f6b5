//! Generic data table.
//!
//! Renders caller-defined columns over any [`TableRow`] type with three
//! mutually exclusive bodies (loading skeleton, empty message, rows) and an
//! optional page-window pagination strip. The table never fetches, sorts or
//! pages data itself: it reports row clicks, page changes and header clicks
//! back to the owning page through callbacks.
//!
//! ```rust,ignore
//! view! {
//!     <DataTable
//!         data=Signal::derive(move || page.get().items)
//!         columns=survey_columns()
//!         loading=Signal::derive(move || query.is_loading.get())
//!         pagination=Signal::derive(move || Some(Pagination::new(info.get(), go_to_page)))
//!         on_row_click=Callback::new(move |(survey, _index): (Survey, usize)| open(survey))
//!     />
//! }
//! ```

pub mod cell;
pub mod column;
pub mod page_window;
pub mod row_state;
pub mod sort;

pub use cell::{cell_text, CellValue, TableRow, EMPTY_CELL};
pub use column::{CellContent, CellRenderer, Column};
pub use page_window::{page_window, PageInfo, PageItem};
pub use row_state::{BodyState, HoverState, SKELETON_ROWS};
pub use sort::{compare_cells, sort_rows, SortDescriptor, SortOrder, SortState};

use leptos::prelude::*;

use crate::shared::components::pagination_controls::PaginationControls;

pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";

/// Pagination descriptor handed to the table by the page that owns paging
#[derive(Clone, Copy)]
pub struct Pagination {
    pub info: PageInfo,
    pub on_page_change: Callback<usize>,
}

impl Pagination {
    pub fn new(info: PageInfo, on_page_change: Callback<usize>) -> Self {
        Self {
            info,
            on_page_change,
        }
    }
}

/// The strip is hidden while loading and when there is a single page
pub fn should_show_pagination(loading: bool, info: Option<&PageInfo>) -> bool {
    !loading && info.is_some_and(PageInfo::has_multiple_pages)
}

/// Shape of the rendered table for one state of its inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub body: BodyState,
    /// `<tr>` elements inside `<tbody>`
    pub body_rows: usize,
    /// `<td>` per skeleton row; also the colspan of the empty row
    pub cells_per_row: usize,
    pub show_pagination: bool,
}

impl TableLayout {
    pub fn plan(
        loading: bool,
        row_count: usize,
        column_count: usize,
        pagination: Option<&PageInfo>,
    ) -> Self {
        let body = BodyState::resolve(loading, row_count);
        let body_rows = match body {
            BodyState::Skeleton => SKELETON_ROWS,
            BodyState::Empty => 1,
            BodyState::Rows => row_count,
        };
        Self {
            body,
            body_rows,
            cells_per_row: column_count,
            show_pagination: should_show_pagination(loading, pagination),
        }
    }

    /// `colspan` of the single empty-state cell
    pub fn empty_colspan(&self) -> Option<usize> {
        (self.body == BodyState::Empty).then_some(self.cells_per_row)
    }
}

#[component]
pub fn DataTable<R>(
    /// Rows of the current page
    #[prop(into)]
    data: Signal<Vec<R>>,
    /// Column descriptors, in display order
    columns: Vec<Column<R>>,
    /// Shows the skeleton instead of rows and hides pagination
    #[prop(optional, into)]
    loading: Signal<bool>,
    /// Page-window pagination; hidden when absent or single page
    #[prop(optional, into)]
    pagination: MaybeProp<Pagination>,
    /// Message for the empty state
    #[prop(optional, into)]
    empty_message: Option<String>,
    /// Called with the clicked row and its index within the page
    #[prop(optional)]
    on_row_click: Option<Callback<(R, usize)>>,
    /// Makes `sortable` column headers clickable
    #[prop(optional, into)]
    sort: MaybeProp<SortDescriptor>,
) -> impl IntoView
where
    R: TableRow,
{
    let empty_message = empty_message.unwrap_or_else(|| DEFAULT_EMPTY_MESSAGE.to_string());
    let column_count = columns.len();
    let columns = StoredValue::new(columns);
    let hover = RwSignal::new(HoverState::default());
    let clickable = on_row_click.is_some();

    let header = move || {
        columns.with_value(|cols| {
            cols.iter()
                .map(|column| {
                    let key = column.key;
                    let sortable = column.sortable;
                    let class = if sortable {
                        format!("{} data-table__header--sortable", column.cell_class())
                    } else {
                        column.cell_class()
                    };
                    view! {
                        <th
                            class=class
                            on:click=move |_| {
                                if !sortable {
                                    return;
                                }
                                if let Some(descriptor) = sort.get() {
                                    descriptor.on_sort.run(key.to_string());
                                }
                            }
                        >
                            {column.header.clone()}
                            {move || {
                                if !sortable {
                                    return None;
                                }
                                sort.get().map(|descriptor| view! {
                                    <span class="data-table__sort-indicator">
                                        {descriptor.state.indicator(key)}
                                    </span>
                                })
                            }}
                        </th>
                    }
                })
                .collect_view()
        })
    };

    let pagination_info = move || pagination.get().map(|p| p.info);

    let skeleton = move |layout: TableLayout| {
        (0..layout.body_rows)
            .map(|_| {
                view! {
                    <tr class="data-table__row data-table__row--skeleton">
                        {(0..layout.cells_per_row)
                            .map(|_| view! {
                                <td class="data-table__cell">
                                    <div class="data-table__skeleton"></div>
                                </td>
                            })
                            .collect_view()}
                    </tr>
                }
            })
            .collect_view()
    };

    let body = move || {
        let rows = data.get();
        let layout = TableLayout::plan(
            loading.get(),
            rows.len(),
            column_count,
            pagination_info().as_ref(),
        );
        match layout.body {
            BodyState::Skeleton => skeleton(layout).into_any(),
            BodyState::Empty => view! {
                <tr class="data-table__row data-table__row--empty">
                    <td
                        class="data-table__cell data-table__empty"
                        colspan=layout.empty_colspan().unwrap_or(column_count).to_string()
                    >
                        {empty_message.clone()}
                    </td>
                </tr>
            }
            .into_any(),
            BodyState::Rows => rows
                .into_iter()
                .enumerate()
                .map(|(index, row)| {
                    let cells = columns.with_value(|cols| {
                        cols.iter()
                            .map(|column| {
                                let class = column.cell_class();
                                let content = column.content(&row);
                                view! { <td class=class>{content.into_any()}</td> }
                            })
                            .collect_view()
                    });
                    view! {
                        <tr
                            class=move || {
                                let base = hover.with(|h| h.row_class(index));
                                if clickable {
                                    format!("{} data-table__row--clickable", base)
                                } else {
                                    base.to_string()
                                }
                            }
                            on:mouseenter=move |_| hover.update(|h| h.enter(index))
                            on:mouseleave=move |_| hover.update(|h| h.leave())
                            on:click=move |_| {
                                if let Some(callback) = on_row_click {
                                    callback.run((row.clone(), index));
                                }
                            }
                        >
                            {cells}
                        </tr>
                    }
                })
                .collect_view()
                .into_any(),
        }
    };

    let footer = move || {
        let pagination = pagination.get()?;
        let layout = TableLayout::plan(
            loading.get(),
            data.with(Vec::len),
            column_count,
            Some(&pagination.info),
        );
        layout
            .show_pagination
            .then(|| view! { <PaginationControls pagination=pagination /> })
    };

    view! {
        <div class="data-table">
            <div class="table-wrapper">
                <table class="data-table__table">
                    <thead>
                        <tr class="data-table__header-row">{header}</tr>
                    </thead>
                    <tbody>{body}</tbody>
                </table>
            </div>
            {footer}
        </div>
    }
}
