pub use crate::{
    demand::{baselinebuilder::*, demandtable::*, seasonality::*},
    scenarios::scenario::*,
    segments::{enums::*, segmentcatalog::*},
    simulation::{comparison::*, revenuesimulator::*, simulationresult::*},
    stats::summary::*,
    time::{enums::*, period::*, seasoncalendar::*},
    utils::errors::*,
};
