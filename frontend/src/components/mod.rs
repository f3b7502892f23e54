pub mod tool_catalog;
