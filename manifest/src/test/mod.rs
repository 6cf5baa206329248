use crate::prelude::*;
use crate::stack::{
    BACKEND_SERVICE, DB_SERVICE, FRONTEND_SERVICE, GATEWAY_SERVICE, MEDIA_VOLUME,
    PG_DATA_VOLUME, PUBLISHED_PORT, STATIC_VOLUME,
};
