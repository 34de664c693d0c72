use bson::oid::ObjectId;
use serde::Deserialize;

///
/// Projection of the user document used to render references
///
#[derive(Deserialize)]
pub struct UserSummaryFindEntity {
    pub _id: ObjectId,
    pub name: String,
    pub email: String,
}
