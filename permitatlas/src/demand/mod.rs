pub mod baselinebuilder;
pub mod demandtable;
pub mod seasonality;
