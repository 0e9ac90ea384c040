mod integration_content_store;
mod unit_breadcrumbs;
mod unit_io_template_source;
mod unit_markdown_filter;
mod unit_models_pages;
mod unit_template_fields;
