pub mod catalog;
pub mod domain;
pub mod highlight;
pub mod navigation;
pub mod pagination;
pub mod ports;
pub mod recommend;
pub mod search;

pub use domain::{
    AuthSession, BookSummary, FavoriteRef, Favorites, Hadith, HadithBook, HadithFigure, NewUser,
    Registration, RelatedHadithRef, Role, User, UserUpdate,
};
pub use ports::{
    BackendService, ContentService, ExplanationService, PortError, PortResult,
    RelatedHadithService, TokenStore,
};
